//! Circular Layout
//!
//! Angles are in degrees, 0° on the positive x axis, growing clockwise on screen
//! (y grows downward). A query protein pinned to the top is centered on -90°.
//!
//! Every protein gets `span = fraction * (360 - pad * count)` and the walk advances by
//! `span + pad`, so the last pad is never closed back onto the first arc: the layout
//! leaves one seam of `pad` degrees where the walk ends.
use crate::intervals::Interval;
use crate::protein::{ArcAngle, InteractionRow, Protein};
use geo::Point;
use std::collections::HashMap;

/// Narrowest span, in degrees, given to a pair of residue-boundary labels.
pub const DEFAULT_MIN_LABEL_SPAN: f64 = 8.0;

const QUERY_EXPANDED_FRACTION: f64 = 0.6;

/// Converts a polar position to screen coordinates.
pub fn polar(angle_degrees: f64, radius: f64) -> Point<f64> {
    let radians = angle_degrees.to_radians();
    Point::new(radius * radians.cos(), radius * radians.sin())
}

/// Arc assignment for an ordered set of proteins.
#[derive(Clone, Debug, Default)]
pub struct ArcLayout {
    order: Vec<String>,
    positions: HashMap<String, usize>,
    angles: HashMap<String, ArcAngle>,
    lengths: HashMap<String, f64>,
}

impl ArcLayout {
    /// Protein names in drawing order (query first when it was moved).
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn angle(&self, protein: &str) -> Option<ArcAngle> {
        self.angles.get(protein).copied()
    }

    /// Layout denominator used for `protein`.
    pub fn length(&self, protein: &str) -> Option<f64> {
        self.lengths.get(protein).copied()
    }

    /// Position of `protein` in the drawing order.
    pub fn index_of(&self, protein: &str) -> Option<usize> {
        self.positions.get(protein).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ArcAngle)> + '_ {
        self.order
            .iter()
            .filter_map(|name| Some((name.as_str(), *self.angles.get(name)?)))
    }
}

/// Allocates one arc per protein around the circle.
///
/// With a `query` present among more than one protein, the query moves to the front and
/// is centered at the top. `expand_query` then fixes its share at 60% of the usable
/// budget; the others split the remainder by length.
pub fn compute_arc_angles(
    proteins: &[Protein],
    pad_angle: f64,
    query: Option<&str>,
    expand_query: bool,
) -> ArcLayout {
    if proteins.is_empty() {
        return ArcLayout::default();
    }

    let mut ordered: Vec<&Protein> = proteins.iter().collect();
    let query_first = match query {
        Some(query) if ordered.len() > 1 => match ordered.iter().position(|p| p.name == query) {
            Some(index) => {
                let protein = ordered.remove(index);
                ordered.insert(0, protein);
                true
            }
            None => false,
        },
        _ => false,
    };

    let count = ordered.len() as f64;
    let budget = 360.0 - pad_angle * count;
    let total: f64 = ordered.iter().map(|p| p.layout_length()).sum();

    let fractions: Vec<f64> = if query_first && expand_query {
        let others: f64 = ordered[1..].iter().map(|p| p.layout_length()).sum();
        std::iter::once(QUERY_EXPANDED_FRACTION)
            .chain(
                ordered[1..]
                    .iter()
                    .map(|p| (1.0 - QUERY_EXPANDED_FRACTION) * p.layout_length() / others),
            )
            .collect()
    } else {
        ordered.iter().map(|p| p.layout_length() / total).collect()
    };

    let mut cursor = if query_first {
        -90.0 - fractions[0] * budget / 2.0
    } else {
        0.0
    };

    let mut layout = ArcLayout::default();
    for (protein, fraction) in ordered.iter().zip(fractions) {
        let span = fraction * budget;
        layout.angles.insert(
            protein.name.clone(),
            ArcAngle {
                start: cursor,
                end: cursor + span,
            },
        );
        layout
            .lengths
            .insert(protein.name.clone(), protein.layout_length());
        layout
            .positions
            .insert(protein.name.clone(), layout.order.len());
        layout.order.push(protein.name.clone());
        cursor += span + pad_angle;
    }
    log::debug!(
        "laid out {} arcs, budget {:.2} degrees, query first: {}",
        layout.len(),
        budget,
        query_first
    );
    layout
}

/// Maps a residue interval onto its arc.
///
/// Residue `r` occupies the slot `[(r - 1) / length, r / length]` of the arc, so
/// `[1, length]` covers the arc exactly. Domain segments use the same mapping.
pub fn residue_span_angles(arc: ArcAngle, interval: Interval, length: f64) -> (f64, f64) {
    let span = arc.span();
    let start = arc.start + ((interval.0 - 1) as f64 / length) * span;
    let end = arc.start + (interval.1 as f64 / length) * span;
    (start, end)
}

/// Sub-arc angles at both ends of one chord.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChordAngles {
    pub pos1_start: f64,
    pub pos1_end: f64,
    pub pos2_start: f64,
    pub pos2_end: f64,
}

impl ChordAngles {
    /// Angle of the shared control point: halfway from side 1's start to side 2's end.
    pub fn control_angle(&self) -> f64 {
        (self.pos1_start + self.pos2_end) / 2.0
    }

    pub fn mid1(&self) -> f64 {
        (self.pos1_start + self.pos1_end) / 2.0
    }

    pub fn mid2(&self) -> f64 {
        (self.pos2_start + self.pos2_end) / 2.0
    }
}

/// Computes both sub-arcs of `row`. `None` if either protein is not in the layout.
pub fn chord_endpoint_angles(row: &InteractionRow, layout: &ArcLayout) -> Option<ChordAngles> {
    let arc1 = layout.angle(&row.protein1)?;
    let arc2 = layout.angle(&row.protein2)?;
    let (pos1_start, pos1_end) = residue_span_angles(arc1, row.res1, layout.length(&row.protein1)?);
    let (pos2_start, pos2_end) = residue_span_angles(arc2, row.res2, layout.length(&row.protein2)?);
    Some(ChordAngles {
        pos1_start,
        pos1_end,
        pos2_start,
        pos2_end,
    })
}

/// Widens a label span narrower than `min_span` symmetrically around its center.
///
/// Only label placement uses the result; chord geometry keeps the raw angles.
pub fn widen_narrow_label_span(start: f64, end: f64, min_span: f64) -> (f64, f64) {
    if (end - start).abs() >= min_span {
        return (start, end);
    }
    let mid = (start + end) / 2.0;
    (mid - min_span / 2.0, mid + min_span / 2.0)
}

/// Rotation keeping radial text upright; flips labels on the 90°-270° half.
pub fn upright_label_rotation(mid_angle: f64) -> (f64, bool) {
    let normalized = mid_angle.rem_euclid(360.0);
    if (90.0..270.0).contains(&normalized) {
        (mid_angle + 180.0, true)
    } else {
        (mid_angle, false)
    }
}
