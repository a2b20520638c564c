//! SVG Output
//!
//! Hover behavior is carried by an embedded stylesheet and clicks by `<a>` wrappers, so
//! the document stays interactive without any script.
use crate::palette::{CHORD_HOVER_OPACITY, CHORD_OPACITY};
use crate::scene::{Chord, Gradient, Label, Paint, Rendered, Scene, Wedge};
use geo::Point;
use ppiviz_core::polar;
use svg::node::element::{
    Anchor, Definitions, Group, LinearGradient, Path, Stop, Style, Text, Title,
};
use svg::Document;

// Helper Functions ---------------------------------------------------------------------------

fn fmt_point(point: Point<f64>) -> String {
    format!("{:.3} {:.3}", point.x(), point.y())
}

fn large_arc(start: f64, end: f64) -> u8 {
    u8::from((end - start).abs() > 180.0)
}

/// `A` commands along the circle of radius `r` from `from` to `to` degrees. A full turn is
/// split in two halves: an arc whose endpoints coincide draws nothing.
fn arc_to(from: f64, to: f64, r: f64, sweep: u8) -> String {
    let segment = |a: f64, b: f64| {
        format!(
            "A {r:.3} {r:.3} 0 {} {sweep} {}",
            large_arc(a, b),
            fmt_point(polar(b, r))
        )
    };
    if (to - from).abs() >= 360.0 {
        let mid = (from + to) / 2.0;
        format!("{} {}", segment(from, mid), segment(mid, to))
    } else {
        segment(from, to)
    }
}

/// Path data of an annular wedge from `start` to `end` degrees.
pub(crate) fn wedge_path_data(start: f64, end: f64, inner: f64, outer: f64) -> String {
    format!(
        "M {} {} L {} {} Z",
        fmt_point(polar(start, outer)),
        arc_to(start, end, outer, 1),
        fmt_point(polar(end, inner)),
        arc_to(end, start, inner, 0),
    )
}

/// Path data of a chord ribbon: along side 1, a quadratic curve to side 2, along side 2,
/// and a quadratic curve back, both curves through the shared control point.
pub(crate) fn ribbon_path_data(chord: &Chord) -> String {
    let r = chord.radius;
    let angles = &chord.angles;
    let control = fmt_point(chord.control);
    format!(
        "M {} {} Q {control} {} {} Q {control} {} Z",
        fmt_point(polar(angles.pos1_start, r)),
        arc_to(angles.pos1_start, angles.pos1_end, r, 1),
        fmt_point(polar(angles.pos2_start, r)),
        arc_to(angles.pos2_start, angles.pos2_end, r, 1),
        fmt_point(polar(angles.pos1_start, r)),
    )
}

fn hover_stylesheet() -> String {
    format!(
        ".chord {{ fill-opacity: {CHORD_OPACITY}; }}\n\
         .chord-group:hover .chord {{ fill-opacity: {CHORD_HOVER_OPACITY}; }}\n\
         .residue-label {{ visibility: hidden; pointer-events: none; }}\n\
         .chord-group:hover .residue-label {{ visibility: visible; }}\n\
         .arc:hover, .domain-arc:hover {{ stroke: #333333; stroke-width: 1; }}"
    )
}

fn wedge_path(wedge: &Wedge, class: &str) -> Path {
    let path = Path::new()
        .set("class", class)
        .set("data-protein", wedge.protein.as_str())
        .set("fill", wedge.fill.as_str())
        .set("fill-opacity", wedge.opacity)
        .set(
            "d",
            wedge_path_data(wedge.start, wedge.end, wedge.inner, wedge.outer),
        );
    match &wedge.title {
        Some(title) => path.add(Title::new(title.as_str())),
        None => path,
    }
}

fn label_text(label: &Label) -> Text {
    let (x, y) = (label.position.x(), label.position.y());
    let text = Text::new(label.text.as_str())
        .set("class", label.class)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", label.anchor)
        .set("dominant-baseline", "middle")
        .set("font-family", "sans-serif")
        .set("font-size", label.font_size);
    if label.rotate != 0.0 {
        text.set("transform", format!("rotate({:.3} {:.3} {:.3})", label.rotate, x, y))
    } else {
        text
    }
}

fn linear_gradient(gradient: &Gradient) -> LinearGradient {
    LinearGradient::new()
        .set("id", gradient.id.as_str())
        .set("gradientUnits", "userSpaceOnUse")
        .set("x1", gradient.from.x())
        .set("y1", gradient.from.y())
        .set("x2", gradient.to.x())
        .set("y2", gradient.to.y())
        .add(
            Stop::new()
                .set("offset", "0%")
                .set("stop-color", gradient.from_color.as_str()),
        )
        .add(
            Stop::new()
                .set("offset", "100%")
                .set("stop-color", gradient.to_color.as_str()),
        )
}

fn chord_anchor(chord: &Chord) -> Anchor {
    let fill = match &chord.paint {
        Paint::Solid(color) => color.clone(),
        Paint::Gradient(id) => format!("url(#{})", id),
    };
    let ribbon = Path::new()
        .set("class", "chord")
        .set("fill", fill)
        .set("fill-opacity", chord.opacity)
        .set("d", ribbon_path_data(chord))
        .add(Title::new(format!("{} / {}", chord.protein1, chord.protein2)));
    let group = chord.labels.iter().fold(
        Group::new()
            .set("class", "chord-group")
            .set("data-protein1", chord.protein1.as_str())
            .set("data-protein2", chord.protein2.as_str())
            .add(ribbon),
        |group, label| group.add(label_text(label)),
    );
    Anchor::new()
        .set("href", chord.href.as_str())
        .add(group)
}

// IMPL---------------------------------------------------------------------------

impl Scene {
    pub fn to_document(&self) -> Document {
        let half = self.size / 2.0;
        let mut document = Document::new()
            .set("width", self.size)
            .set("height", self.size)
            .set("viewBox", (-half, -half, self.size, self.size))
            .add(Style::new(hover_stylesheet()));

        if !self.gradients.is_empty() {
            document = document.add(
                self.gradients
                    .iter()
                    .fold(Definitions::new(), |defs, gradient| {
                        defs.add(linear_gradient(gradient))
                    }),
            );
        }

        let arcs = self
            .arcs
            .iter()
            .fold(Group::new().set("class", "arcs"), |group, wedge| {
                group.add(wedge_path(wedge, "arc"))
            });
        let domains = self
            .domains
            .iter()
            .fold(Group::new().set("class", "domains"), |group, wedge| {
                group.add(wedge_path(wedge, "domain-arc"))
            });
        let chords = self
            .chords
            .iter()
            .fold(Group::new().set("class", "chords"), |group, chord| {
                group.add(chord_anchor(chord))
            });
        let labels = self
            .labels
            .iter()
            .fold(Group::new().set("class", "labels"), |group, label| {
                group.add(label_text(label))
            });

        document = document.add(chords).add(arcs).add(domains).add(labels);

        if let Some(title) = &self.title {
            document = document.add(
                Text::new(title.as_str())
                    .set("class", "title")
                    .set("x", 0.0)
                    .set("y", -half + 20.0)
                    .set("text-anchor", "middle")
                    .set("font-family", "sans-serif")
                    .set("font-size", 16.0),
            );
        }
        document
    }
}

impl Rendered {
    /// Standalone document; a placeholder becomes its message centered on a blank canvas.
    pub fn to_document(&self, size: f64) -> Document {
        match self {
            Rendered::Diagram(scene) => scene.to_document(),
            Rendered::Placeholder(message) => {
                let half = size / 2.0;
                Document::new()
                    .set("width", size)
                    .set("height", size)
                    .set("viewBox", (-half, -half, size, size))
                    .add(
                        Text::new(message.as_str())
                            .set("class", "placeholder")
                            .set("x", 0.0)
                            .set("y", 0.0)
                            .set("text-anchor", "middle")
                            .set("font-family", "sans-serif")
                            .set("font-size", 14.0),
                    )
            }
        }
    }
}
