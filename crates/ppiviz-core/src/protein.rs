//! Proteins, Domains and Interactions
//!
//! The fixed-shape records every layout and rendering step consumes.
use crate::intervals::Interval;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Length used when neither the length table nor the interaction rows know a protein.
pub const DEFAULT_PROTEIN_LENGTH: u32 = 1000;

/// One sequence on the circular layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protein {
    pub name: String,
    pub length: u32,
}

impl Protein {
    pub fn new(name: impl Into<String>, length: u32) -> Self {
        Protein {
            name: name.into(),
            length,
        }
    }

    /// Denominator for proportional placement. Never below 1.
    pub fn layout_length(&self) -> f64 {
        self.length.max(1) as f64
    }
}

/// Angular assignment of one protein, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ArcAngle {
    pub start: f64,
    pub end: f64,
}

impl ArcAngle {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Provenance of a domain call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DomainSource {
    /// Called by a computational domain predictor.
    Predicted,
    /// Taken from a curated domain database.
    Curated,
}

/// A named sub-range of a protein sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub start: i64,
    pub end: i64,
    pub source: DomainSource,
}

impl Domain {
    /// Clips the domain to `[1, length]`. Returns `None` when nothing is left.
    pub fn clipped(&self, length: u32) -> Option<Interval> {
        let start = self.start.max(1);
        let end = self.end.min(length as i64);
        (start <= end).then_some((start, end))
    }
}

/// Supplies per-protein lengths and domain calls to the layout and renderer.
pub trait DomainProvider {
    fn length(&self, protein: &str) -> Option<u32>;
    fn domains(&self, protein: &str) -> Vec<Domain>;
}

/// Provider that knows nothing; every protein falls back to observed lengths.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDomains;

impl DomainProvider for NoDomains {
    fn length(&self, _protein: &str) -> Option<u32> {
        None
    }
    fn domains(&self, _protein: &str) -> Vec<Domain> {
        vec![]
    }
}

/// Docking-quality scores carried through for display and links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Scores {
    pub iptm: Option<f64>,
    pub min_pae: Option<f64>,
    pub pdockq: Option<f64>,
    pub max_promiscuity: Option<f64>,
}

/// A drawable chord: both residue intervals are resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractionRow {
    pub protein1: String,
    pub protein2: String,
    /// Closed, 1-based residue interval on `protein1`.
    pub res1: Interval,
    /// Closed, 1-based residue interval on `protein2`.
    pub res2: Interval,
    pub absolute1: Vec<i64>,
    pub absolute2: Vec<i64>,
    /// Absolute minus fragment-relative numbering, when both are known.
    pub shift1: Option<i64>,
    pub shift2: Option<i64>,
    pub fragment1: String,
    pub fragment2: String,
    pub scores: Scores,
    pub count: String,
    /// Position of the source row in the input.
    pub source_index: usize,
}
