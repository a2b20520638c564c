//! Chord Plot Construction
//!
//! raw rows -> normalized rows and proteins -> arc layout -> scene.
use crate::config::{ArcColoringMode, ChordConfig, ColoringMode};
use crate::link::interaction_link;
use crate::palette::{
    domain_display_name, palette, DomainColors, ARC_OPACITY, CHORD_OPACITY, GREY_FOCAL,
    GREY_NEUTRAL, GREY_OTHER, OVERLAID_ARC_OPACITY, PREDICTED_DOMAIN,
};
use crate::scene::{Chord, Gradient, Label, Paint, Rendered, Scene, Wedge};
use ppiviz_core::{
    chord_endpoint_angles, compute_arc_angles, normalize_rows, polar, residue_span_angles,
    resolve_proteins, upright_label_rotation, widen_narrow_label_span, ArcLayout, DomainProvider,
    DomainSource, InteractionRow, Protein, RawRow,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub const EMPTY_MESSAGE: &str = "No interactions to display";
pub const LOADING_MESSAGE: &str = "Loading...";

/// Room outside the arcs for protein labels.
const LABEL_MARGIN: f64 = 80.0;
const ARC_WIDTH: f64 = 16.0;
/// Above this many proteins, name labels turn radial.
const CROWDED_PROTEIN_COUNT: usize = 20;

/// Gradient ids must stay unique across every document rendered by the process.
static GRADIENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Counts reported alongside a render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub arcs: usize,
    pub chords: usize,
    pub dropped: usize,
}

struct Radii {
    inner: f64,
    outer: f64,
}

impl Radii {
    fn for_size(size: f64) -> Self {
        let outer = (size / 2.0 - LABEL_MARGIN).max(2.0 * ARC_WIDTH);
        Radii {
            inner: outer - ARC_WIDTH,
            outer,
        }
    }
}

/// Builds the chord plot for `rows`. Never fails: unusable input yields a placeholder.
pub fn build_scene(
    rows: &[RawRow],
    config: &ChordConfig,
    provider: &dyn DomainProvider,
) -> (Rendered, SceneStats) {
    if rows.is_empty() {
        return (Rendered::Placeholder(EMPTY_MESSAGE.to_string()), SceneStats::default());
    }
    let normalized = normalize_rows(rows);
    let mut stats = SceneStats {
        dropped: normalized.dropped,
        ..SceneStats::default()
    };
    if normalized.rows.is_empty() {
        return (Rendered::Placeholder(EMPTY_MESSAGE.to_string()), stats);
    }

    let proteins = resolve_proteins(&normalized, provider);
    let layout = compute_arc_angles(
        &proteins,
        config.pad_angle,
        config.query_protein.as_deref(),
        config.expand_query,
    );
    let radii = Radii::for_size(config.size);

    let mut scene = Scene {
        size: config.size,
        title: config.title.clone(),
        ..Scene::default()
    };
    draw_arcs(&mut scene, &layout, &proteins, config, provider, &radii);
    draw_labels(&mut scene, &layout, &proteins, &radii);
    for (index, row) in normalized.rows.iter().enumerate() {
        draw_chord(&mut scene, &layout, row, index, config, &radii);
    }

    stats.arcs = scene.arcs.len();
    stats.chords = scene.chords.len();
    log::debug!(
        "chord plot: {} arcs, {} domain segments, {} chords",
        stats.arcs,
        scene.domains.len(),
        stats.chords
    );
    (Rendered::Diagram(scene), stats)
}

fn draw_arcs(
    scene: &mut Scene,
    layout: &ArcLayout,
    proteins: &[Protein],
    config: &ChordConfig,
    provider: &dyn DomainProvider,
    radii: &Radii,
) {
    let lengths: HashMap<&str, u32> = proteins
        .iter()
        .map(|protein| (protein.name.as_str(), protein.length))
        .collect();
    let mut domain_colors = DomainColors::default();

    for (index, (name, arc)) in layout.iter().enumerate() {
        let length = lengths.get(name).copied().unwrap_or(1);
        let domains = if config.show_domains_on_arcs {
            provider.domains(name)
        } else {
            vec![]
        };
        let overlaid = !domains.is_empty();

        let (fill, opacity) = if overlaid {
            (GREY_NEUTRAL, OVERLAID_ARC_OPACITY)
        } else {
            match config.arc_coloring_mode {
                ArcColoringMode::GreyOnly if index == 0 => (GREY_FOCAL, ARC_OPACITY),
                ArcColoringMode::GreyOnly => (GREY_OTHER, ARC_OPACITY),
                ArcColoringMode::Default => (palette(index), ARC_OPACITY),
            }
        };
        scene.arcs.push(Wedge {
            protein: name.to_string(),
            start: arc.start,
            end: arc.end,
            inner: radii.inner,
            outer: radii.outer,
            fill: fill.to_string(),
            opacity,
            title: Some(format!("{} ({} aa)", name, length)),
        });

        let layout_length = layout.length(name).unwrap_or(1.0);
        for domain in &domains {
            let Some(range) = domain.clipped(length) else {
                log::debug!("domain {} lies outside {} (length {})", domain.id, name, length);
                continue;
            };
            let (start, end) = residue_span_angles(arc, range, layout_length);
            let fill = match domain.source {
                DomainSource::Predicted => PREDICTED_DOMAIN,
                DomainSource::Curated => domain_colors.color(&domain.id),
            };
            scene.domains.push(Wedge {
                protein: name.to_string(),
                start,
                end,
                inner: radii.inner,
                outer: radii.outer,
                fill: fill.to_string(),
                opacity: ARC_OPACITY,
                title: Some(format!(
                    "{} ({}-{})",
                    domain_display_name(&domain.id),
                    range.0,
                    range.1
                )),
            });
        }
    }
}

fn draw_labels(scene: &mut Scene, layout: &ArcLayout, proteins: &[Protein], radii: &Radii) {
    let crowded = layout.len() > CROWDED_PROTEIN_COUNT;
    let lengths: HashMap<&str, u32> = proteins
        .iter()
        .map(|protein| (protein.name.as_str(), protein.length))
        .collect();
    for (name, arc) in layout.iter() {
        let mid = arc.mid();
        let (radius, rotate, anchor) = if crowded {
            let (rotate, flipped) = upright_label_rotation(mid);
            (radii.outer + 6.0, rotate, if flipped { "end" } else { "start" })
        } else {
            (radii.outer + 14.0, 0.0, "middle")
        };
        scene.labels.push(Label {
            position: polar(mid, radius),
            text: name.to_string(),
            rotate,
            anchor,
            font_size: if crowded { 9.0 } else { 12.0 },
            class: "protein-label",
        });

        if let Some(length) = lengths.get(name) {
            scene.labels.push(Label {
                position: polar(arc.end, radii.outer + 4.0),
                text: length.to_string(),
                rotate: 0.0,
                anchor: "middle",
                font_size: 8.0,
                class: "length-label",
            });
        }
    }
}

fn chord_paint(
    scene: &mut Scene,
    layout: &ArcLayout,
    row: &InteractionRow,
    index: usize,
    config: &ChordConfig,
    mids: (f64, f64),
    radius: f64,
) -> Paint {
    let color_of = |protein: &str| palette(layout.index_of(protein).unwrap_or(0));
    match config.coloring_mode {
        ColoringMode::ByProtein1 => Paint::Solid(color_of(&row.protein1).to_string()),
        ColoringMode::ByPartner => {
            let partner = if config.query_protein.as_deref() == Some(row.protein1.as_str()) {
                &row.protein2
            } else {
                &row.protein1
            };
            Paint::Solid(color_of(partner).to_string())
        }
        ColoringMode::Varied => Paint::Solid(palette(index).to_string()),
        ColoringMode::Gradient => {
            let id = format!(
                "chord-gradient-{}",
                GRADIENT_SEQ.fetch_add(1, Ordering::Relaxed)
            );
            scene.gradients.push(Gradient {
                id: id.clone(),
                from: polar(mids.0, radius),
                to: polar(mids.1, radius),
                from_color: color_of(&row.protein1).to_string(),
                to_color: color_of(&row.protein2).to_string(),
            });
            Paint::Gradient(id)
        }
    }
}

fn draw_chord(
    scene: &mut Scene,
    layout: &ArcLayout,
    row: &InteractionRow,
    index: usize,
    config: &ChordConfig,
    radii: &Radii,
) {
    let Some(angles) = chord_endpoint_angles(row, layout) else {
        log::warn!(
            "no arc for {} or {}, chord skipped",
            row.protein1,
            row.protein2
        );
        return;
    };
    let paint = chord_paint(
        scene,
        layout,
        row,
        index,
        config,
        (angles.mid1(), angles.mid2()),
        radii.inner,
    );

    let label_radius = radii.inner - 10.0;
    let side1 = widen_narrow_label_span(angles.pos1_start, angles.pos1_end, config.min_label_span);
    let side2 = widen_narrow_label_span(angles.pos2_start, angles.pos2_end, config.min_label_span);
    let labels = [
        (side1.0, row.res1.0),
        (side1.1, row.res1.1),
        (side2.0, row.res2.0),
        (side2.1, row.res2.1),
    ]
    .into_iter()
    .map(|(angle, residue)| Label {
        position: polar(angle, label_radius),
        text: residue.to_string(),
        rotate: 0.0,
        anchor: "middle",
        font_size: 9.0,
        class: "residue-label",
    })
    .collect();

    scene.chords.push(Chord {
        protein1: row.protein1.clone(),
        protein2: row.protein2.clone(),
        angles,
        radius: radii.inner,
        control: polar(angles.control_angle(), config.chord_radius),
        paint,
        opacity: CHORD_OPACITY,
        labels,
        href: interaction_link(&config.link_base, row),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppiviz_core::{Domain, NoDomains};

    struct Table(HashMap<String, (u32, Vec<Domain>)>);

    impl DomainProvider for Table {
        fn length(&self, protein: &str) -> Option<u32> {
            self.0.get(protein).map(|(length, _)| *length)
        }
        fn domains(&self, protein: &str) -> Vec<Domain> {
            self.0
                .get(protein)
                .map(|(_, domains)| domains.clone())
                .unwrap_or_default()
        }
    }

    fn domain(id: &str, start: i64, end: i64, source: DomainSource) -> Domain {
        Domain {
            id: id.to_string(),
            start,
            end,
            source,
        }
    }

    fn table() -> Table {
        Table(HashMap::from([
            (
                "A".to_string(),
                (
                    50,
                    vec![
                        domain("domain_1", 1, 24, DomainSource::Predicted),
                        domain("SH3_1", 30, 60, DomainSource::Curated),
                    ],
                ),
            ),
            (
                "B".to_string(),
                (
                    150,
                    vec![
                        domain("SH3_2", 10, 40, DomainSource::Curated),
                        domain("Kinase_1", 200, 300, DomainSource::Curated),
                    ],
                ),
            ),
        ]))
    }

    fn raw(p1: &str, p2: &str, r1: &str, r2: &str) -> RawRow {
        RawRow::new()
            .with("Protein1", p1)
            .with("Protein2", p2)
            .with(
                "absolute_location",
                format!("{{'Protein1': [{}], 'Protein2': [{}]}}", r1, r2),
            )
    }

    fn scene(rows: &[RawRow], config: &ChordConfig, provider: &dyn DomainProvider) -> Scene {
        match build_scene(rows, config, provider).0 {
            Rendered::Diagram(scene) => scene,
            Rendered::Placeholder(message) => panic!("unexpected placeholder: {}", message),
        }
    }

    #[test]
    fn test_empty_input_is_placeholder() {
        let (rendered, stats) = build_scene(&[], &ChordConfig::default(), &NoDomains);
        assert_eq!(rendered, Rendered::Placeholder(EMPTY_MESSAGE.to_string()));
        assert_eq!(stats, SceneStats::default());

        let undrawable = [raw("A", "B", "", "3")];
        let (rendered, stats) = build_scene(&undrawable, &ChordConfig::default(), &NoDomains);
        assert_eq!(rendered.markup(), EMPTY_MESSAGE);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_two_protein_scene() {
        let rows = [raw("A", "B", "10, 20", "100, 120")];
        let scene = scene(&rows, &ChordConfig::default(), &table());
        assert_eq!(scene.arcs.len(), 2);
        assert_eq!(scene.chords.len(), 1);
        assert!((scene.arcs[0].end - scene.arcs[0].start - 89.0).abs() < 1e-9);
        assert!((scene.arcs[1].end - scene.arcs[1].start - 267.0).abs() < 1e-9);
        assert_eq!(scene.arcs[0].fill, PALETTE_0);
        assert_eq!(scene.arcs[0].opacity, ARC_OPACITY);
        assert!(scene.domains.is_empty());

        let chord = &scene.chords[0];
        assert!(chord.href.contains("p1=A&p2=B"));
        assert_eq!(chord.paint, Paint::Solid(PALETTE_0.to_string()));
        assert_eq!(chord.opacity, CHORD_OPACITY);
        let texts: Vec<&str> = chord.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["10", "20", "100", "120"]);
        // control point sits at the center by default
        assert!(chord.control.x().abs() < 1e-9 && chord.control.y().abs() < 1e-9);
    }

    const PALETTE_0: &str = crate::palette::PALETTE[0];

    #[test]
    fn test_control_point_at_chord_radius() {
        let rows = [raw("A", "B", "10, 20", "100, 120")];
        let config = ChordConfig::builder().chord_radius(50.0).build();
        let scene = scene(&rows, &config, &table());
        let chord = &scene.chords[0];
        // A covers [0, 89]; B covers [91, 358]
        let pos1_start = 89.0 * 9.0 / 50.0;
        let pos2_end = 91.0 + 267.0 * 120.0 / 150.0;
        assert!((chord.angles.pos1_start - pos1_start).abs() < 1e-9);
        assert!((chord.angles.pos2_end - pos2_end).abs() < 1e-9);

        let expected = polar((pos1_start + pos2_end) / 2.0, 50.0);
        assert!((chord.control.x() - expected.x()).abs() < 1e-9);
        assert!((chord.control.y() - expected.y()).abs() < 1e-9);
        assert!((chord.control.x().hypot(chord.control.y()) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_chord_labels_are_spread() {
        let rows = [raw("A", "B", "10", "100")];
        let config = ChordConfig::default();
        let scene = scene(&rows, &config, &table());
        let chord = &scene.chords[0];
        // one residue of A spans 89 / 50 degrees; labels still sit 8 degrees apart
        let raw_span = chord.angles.pos1_end - chord.angles.pos1_start;
        assert!((raw_span - 89.0 / 50.0).abs() < 1e-9);
        let radius = Radii::for_size(config.size).inner - 10.0;
        let first = chord.labels[0].position;
        let second = chord.labels[1].position;
        let gap = (second.x() - first.x()).hypot(second.y() - first.y());
        let expected = 2.0 * radius * (4.0_f64).to_radians().sin();
        assert!((gap - expected).abs() < 1e-6);
    }

    #[test]
    fn test_coloring_modes() {
        let rows = [
            raw("A", "Q", "1", "2"),
            raw("Q", "B", "3", "4"),
            raw("A", "Q", "5", "6"),
        ];
        let base = || {
            ChordConfig::builder()
                .query_protein("Q")
                .pad_angle(1.0)
        };

        let by_protein1 = scene(&rows, &base().build(), &NoDomains);
        // layout order is Q, A, B
        let fills: Vec<Paint> = by_protein1.chords.iter().map(|c| c.paint.clone()).collect();
        assert_eq!(
            fills,
            vec![
                Paint::Solid(palette(1).to_string()),
                Paint::Solid(palette(0).to_string()),
                Paint::Solid(palette(1).to_string()),
            ]
        );

        let by_partner = scene(
            &rows,
            &base().coloring_mode(ColoringMode::ByPartner).build(),
            &NoDomains,
        );
        assert_eq!(
            by_partner.chords[1].paint,
            Paint::Solid(palette(2).to_string())
        );
        assert_eq!(
            by_partner.chords[0].paint,
            Paint::Solid(palette(1).to_string())
        );

        let varied = scene(
            &rows,
            &base().coloring_mode(ColoringMode::Varied).build(),
            &NoDomains,
        );
        assert_ne!(varied.chords[0].paint, varied.chords[2].paint);
        assert_eq!(varied.chords[2].paint, Paint::Solid(palette(2).to_string()));
    }

    #[test]
    fn test_gradient_ids_are_unique() {
        let rows = [raw("A", "B", "1", "2"), raw("B", "A", "3", "4")];
        let config = ChordConfig::builder()
            .coloring_mode(ColoringMode::Gradient)
            .build();
        let first = scene(&rows, &config, &NoDomains);
        let second = scene(&rows, &config, &NoDomains);
        assert_eq!(first.gradients.len(), 2);
        let mut ids: Vec<&str> = first
            .gradients
            .iter()
            .chain(&second.gradients)
            .map(|g| g.id.as_str())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(
            first.chords[0].paint,
            Paint::Gradient(first.gradients[0].id.clone())
        );
        assert_eq!(first.gradients[0].from_color, palette(0));
        assert_eq!(first.gradients[0].to_color, palette(1));
    }

    #[test]
    fn test_grey_only_arcs() {
        let rows = [raw("A", "B", "1", "2"), raw("C", "A", "3", "4")];
        let config = ChordConfig::builder()
            .arc_coloring_mode(ArcColoringMode::GreyOnly)
            .build();
        let scene = scene(&rows, &config, &NoDomains);
        let fills: Vec<&str> = scene.arcs.iter().map(|a| a.fill.as_str()).collect();
        assert_eq!(fills, vec![GREY_FOCAL, GREY_OTHER, GREY_OTHER]);
    }

    #[test]
    fn test_domain_overlay() {
        let rows = [raw("A", "B", "10, 20", "100, 120")];
        let config = ChordConfig::builder().show_domains_on_arcs(true).build();
        let scene = scene(&rows, &config, &table());

        assert!(scene
            .arcs
            .iter()
            .all(|arc| arc.fill == GREY_NEUTRAL && arc.opacity == OVERLAID_ARC_OPACITY));
        // Kinase_1 lies past B's end and is dropped; SH3_1 is clipped to A's length
        assert_eq!(scene.domains.len(), 3);
        let titles: Vec<&str> = scene
            .domains
            .iter()
            .filter_map(|d| d.title.as_deref())
            .collect();
        assert_eq!(titles, vec!["domain (1-24)", "SH3 (30-50)", "SH3 (10-40)"]);
        assert_eq!(scene.domains[0].fill, PREDICTED_DOMAIN);
        assert_eq!(scene.domains[1].fill, scene.domains[2].fill);
        assert!((scene.domains[1].end - scene.arcs[0].end).abs() < 1e-9);
    }

    #[test]
    fn test_crowded_labels_rotate() {
        let rows: Vec<RawRow> = (0..11)
            .map(|i| raw(&format!("P{}", 2 * i), &format!("P{}", 2 * i + 1), "1", "1"))
            .collect();
        let scene = scene(&rows, &ChordConfig::default(), &NoDomains);
        assert_eq!(scene.arcs.len(), 22);
        let names: Vec<&Label> = scene
            .labels
            .iter()
            .filter(|l| l.class == "protein-label")
            .collect();
        assert_eq!(names.len(), 22);
        assert!(names.iter().all(|l| l.anchor != "middle"));
        assert!(names.iter().any(|l| l.anchor == "end"));
    }
}
