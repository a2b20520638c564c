//! Scene
//!
//! Drawable primitives produced by the renderer. A [`Scene`] knows nothing about SVG;
//! `document.rs` turns it into a document, and tests inspect it directly.
use geo::Point;
use ppiviz_core::ChordAngles;

/// Fill of a chord.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(String),
    /// Reference to a [`Gradient`] by id.
    Gradient(String),
}

/// Annular wedge between two angles.
#[derive(Clone, Debug, PartialEq)]
pub struct Wedge {
    pub protein: String,
    pub start: f64,
    pub end: f64,
    pub inner: f64,
    pub outer: f64,
    pub fill: String,
    pub opacity: f64,
    /// Hover text.
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub position: Point<f64>,
    pub text: String,
    /// Rotation in degrees around `position`.
    pub rotate: f64,
    pub anchor: &'static str,
    pub font_size: f64,
    pub class: &'static str,
}

/// Linear gradient in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub id: String,
    pub from: Point<f64>,
    pub to: Point<f64>,
    pub from_color: String,
    pub to_color: String,
}

/// Ribbon between two residue ranges.
#[derive(Clone, Debug, PartialEq)]
pub struct Chord {
    pub protein1: String,
    pub protein2: String,
    pub angles: ChordAngles,
    /// Radius where the ribbon meets the arcs.
    pub radius: f64,
    /// Control point shared by both quadratic curves.
    pub control: Point<f64>,
    pub paint: Paint,
    pub opacity: f64,
    /// First and last residue of each side, revealed on hover.
    pub labels: Vec<Label>,
    pub href: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub size: f64,
    pub title: Option<String>,
    pub arcs: Vec<Wedge>,
    pub domains: Vec<Wedge>,
    pub labels: Vec<Label>,
    pub chords: Vec<Chord>,
    pub gradients: Vec<Gradient>,
}

/// What a render leaves in its target.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered {
    /// Plain text, no drawing.
    Placeholder(String),
    Diagram(Scene),
}

impl Rendered {
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Rendered::Diagram(scene) => Some(scene),
            Rendered::Placeholder(_) => None,
        }
    }

    /// SVG markup for a diagram, the bare message for a placeholder.
    pub fn markup(&self) -> String {
        match self {
            Rendered::Diagram(scene) => scene.to_document().to_string(),
            Rendered::Placeholder(message) => message.clone(),
        }
    }
}
