//! # ppiviz-core
//!
//! Data model and layout math for predicted protein-protein interaction plots.
//!
//! __ppiviz-core__ provides functionality for:
//! * Reconciling heterogeneous interaction rows into a fixed-shape [`InteractionRow`]
//! * Parsing the embedded residue-location literals carried by each row
//! * Resolving protein lengths from a length table or observed interface coordinates
//! * Allocating arcs on a circle and mapping residue ranges onto sub-arcs
//! * Merging, parsing and compacting residue ranges
//!
//! The renderer lives in `ppiviz-chord`; this crate is free of any drawing concerns.
//!
mod geometry;
mod intervals;
mod location;
mod normalize;
mod protein;

pub use self::geometry::{
    chord_endpoint_angles, compute_arc_angles, polar, residue_span_angles, upright_label_rotation,
    widen_narrow_label_span, ArcLayout, ChordAngles, DEFAULT_MIN_LABEL_SPAN,
};
pub use self::intervals::{indices_to_ranges, merge_intervals, parse_range_string, Interval};
pub use self::location::{parse_literal, LiteralValue, LocationError, ResidueLocation};
pub use self::normalize::{
    fragment_suffix, normalize_rows, resolve_proteins, Normalized, RawRow, ABSOLUTE_LOCATION_FIELDS,
    COUNT_FIELDS, DOMAIN1_FIELDS, DOMAIN2_FIELDS, PROTEIN1_FIELDS, PROTEIN2_FIELDS,
    RELATIVE_LOCATION_FIELDS, SIDE1_KEYS, SIDE2_KEYS,
};
pub use self::protein::{
    ArcAngle, Domain, DomainProvider, DomainSource, InteractionRow, NoDomains, Protein, Scores,
    DEFAULT_PROTEIN_LENGTH,
};
