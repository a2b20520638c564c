//! Chord Links
//!
//! Clicking a chord opens the interaction's detail view. Missing values become empty
//! parameters rather than being left out.
use itertools::Itertools;
use ppiviz_core::{indices_to_ranges, InteractionRow};

pub const DEFAULT_LINK_BASE: &str = "interaction.html";

fn score(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn shift(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Builds the detail-view URL for one interaction.
///
/// Parameters, in order: `p1`, `p2` (protein names), `f1`, `f2` (fragment ids), `r1`, `r2`
/// (compact absolute residue ranges), `iptm`, `min_pae`, `pdockq`, `max_promiscuity`
/// (two decimals), `count`, and `s1`, `s2` (absolute minus fragment-relative numbering).
pub fn interaction_link(base: &str, row: &InteractionRow) -> String {
    let params = [
        ("p1", row.protein1.clone()),
        ("p2", row.protein2.clone()),
        ("f1", row.fragment1.clone()),
        ("f2", row.fragment2.clone()),
        ("r1", indices_to_ranges(&row.absolute1)),
        ("r2", indices_to_ranges(&row.absolute2)),
        ("iptm", score(row.scores.iptm)),
        ("min_pae", score(row.scores.min_pae)),
        ("pdockq", score(row.scores.pdockq)),
        ("max_promiscuity", score(row.scores.max_promiscuity)),
        ("count", row.count.clone()),
        ("s1", shift(row.shift1)),
        ("s2", shift(row.shift2)),
    ];
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .join("&");
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}
