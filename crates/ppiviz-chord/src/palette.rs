//! Colors
//!
//! Fixed colors of the chord plot. Arc, chord and domain colors are part of the visual
//! contract and are not configurable.
use std::collections::HashMap;

/// Per-protein palette, indexed by layout position modulo its length.
pub const PALETTE: [&str; 16] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#aec7e8", "#ffbb78", "#98df8a", "#ff9896", "#c5b0d5", "#c49c94",
];

pub(crate) const GREY_FOCAL: &str = "#6f6f6f";
pub(crate) const GREY_OTHER: &str = "#c4c4c4";
/// Arc fill under a domain overlay; the domains carry the color.
pub(crate) const GREY_NEUTRAL: &str = "#d9d9d9";
pub(crate) const PREDICTED_DOMAIN: &str = "#4d4d4d";

pub(crate) const ARC_OPACITY: f64 = 0.85;
pub(crate) const OVERLAID_ARC_OPACITY: f64 = 0.7;
pub(crate) const CHORD_OPACITY: f64 = 0.5;
pub(crate) const CHORD_HOVER_OPACITY: f64 = 0.9;

pub(crate) fn palette(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Drops a `_<digits>` copy number: `"Kinase_domain_2"` gives `"Kinase_domain"`, while
/// digits that belong to the name (`"SH2"`, `"C2"`) stay.
pub fn strip_numeric_suffix(id: &str) -> &str {
    id.rsplit_once('_')
        .filter(|(_, n)| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .map_or(id, |(base, _)| base)
}

/// `"SH3_domain_1"` gives `"SH3 domain"`.
pub fn domain_display_name(id: &str) -> String {
    strip_numeric_suffix(id).replace('_', " ").trim().to_string()
}

/// Assigns palette colors to domain identities in first-seen order, so numbered copies
/// of the same domain (`SH3_1`, `SH3_2`) share a color.
#[derive(Debug, Default)]
pub(crate) struct DomainColors {
    assigned: HashMap<String, usize>,
}

impl DomainColors {
    pub(crate) fn color(&mut self, id: &str) -> &'static str {
        let next = self.assigned.len();
        let index = *self
            .assigned
            .entry(strip_numeric_suffix(id).to_string())
            .or_insert(next);
        palette(index)
    }
}
