//! Plot Configuration
use crate::link::DEFAULT_LINK_BASE;
use bon::Builder;
use ppiviz_core::{Interval, DEFAULT_MIN_LABEL_SPAN};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString};

/// How chords are colored.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum ColoringMode {
    /// Palette color of `protein1`.
    #[default]
    #[strum(serialize = "by-protein1")]
    #[serde(rename = "by-protein1")]
    ByProtein1,
    /// Palette color of whichever side is not the query protein.
    #[strum(serialize = "by-partner")]
    #[serde(rename = "by-partner")]
    ByPartner,
    /// Palette cycled by row position, so repeated pairs stay distinguishable.
    #[strum(serialize = "varied")]
    #[serde(rename = "varied")]
    Varied,
    /// Linear gradient between the two proteins' colors.
    #[strum(serialize = "gradient")]
    #[serde(rename = "gradient")]
    Gradient,
}

/// How protein arcs are filled.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum ArcColoringMode {
    #[default]
    #[strum(serialize = "default")]
    #[serde(rename = "default")]
    Default,
    /// First protein dark grey, the rest light grey.
    #[strum(serialize = "grey-only")]
    #[serde(rename = "grey-only")]
    GreyOnly,
}

/// Every option the chord plot recognizes.
///
/// `domain_color_map` and `domain_ranges` are accepted for compatibility with existing
/// callers and are not used by the layout.
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChordConfig {
    /// Edge length of the square canvas.
    #[builder(default = 600.0)]
    pub size: f64,
    #[builder(into)]
    pub title: Option<String>,
    /// Gap between consecutive arcs, in degrees.
    #[builder(default = 2.0)]
    pub pad_angle: f64,
    #[builder(default)]
    pub coloring_mode: ColoringMode,
    #[builder(into)]
    pub query_protein: Option<String>,
    #[builder(default)]
    pub expand_query: bool,
    #[builder(default)]
    pub show_domains_on_arcs: bool,
    #[builder(default)]
    pub domain_color_map: HashMap<String, String>,
    #[builder(default)]
    pub domain_ranges: HashMap<String, Vec<Interval>>,
    #[builder(default)]
    pub arc_coloring_mode: ArcColoringMode,
    /// Radius of the shared chord control point; 0 bows every chord through the center.
    #[builder(default = 0.0)]
    pub chord_radius: f64,
    /// Narrowest angular span given to a pair of residue labels.
    #[builder(default = DEFAULT_MIN_LABEL_SPAN)]
    pub min_label_span: f64,
    /// Detail view that chord links point at.
    #[builder(into, default = DEFAULT_LINK_BASE.to_string())]
    pub link_base: String,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
