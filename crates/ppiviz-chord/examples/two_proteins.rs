use ppiviz_chord::{build_scene, ChordConfig, ColoringMode};
use ppiviz_core::{Domain, DomainProvider, DomainSource, RawRow};
use std::error::Error;

/// Fixed lengths and one curated domain per protein.
struct Demo;

impl DomainProvider for Demo {
    fn length(&self, protein: &str) -> Option<u32> {
        match protein {
            "A" => Some(50),
            "B" => Some(150),
            _ => None,
        }
    }

    fn domains(&self, protein: &str) -> Vec<Domain> {
        let (id, start, end) = match protein {
            "A" => ("SH3_1", 5, 45),
            "B" => ("Kinase_1", 60, 140),
            _ => return vec![],
        };
        vec![Domain {
            id: id.to_string(),
            start,
            end,
            source: DomainSource::Curated,
        }]
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // 1. One interaction, A:[10,20] against B:[100,120]
    let rows = vec![RawRow::new()
        .with("Protein1", "A")
        .with("Protein2", "B")
        .with(
            "absolute_location",
            "{'Protein1': [10, 11, 12, 20], 'Protein2': [100, 101, 120]}",
        )
        .with("iptm", "0.83")];

    // 2. Gradient chords over domain-annotated arcs
    let config = ChordConfig::builder()
        .title("A / B")
        .coloring_mode(ColoringMode::Gradient)
        .show_domains_on_arcs(true)
        .build();

    // 3. Save SVG
    let (rendered, stats) = build_scene(&rows, &config, &Demo);
    match rendered.scene() {
        Some(scene) => {
            svg::save("two_proteins.svg", &scene.to_document())?;
            println!(
                "SVG has been created as 'two_proteins.svg' ({} arcs, {} chords)",
                stats.arcs, stats.chords
            );
        }
        None => println!("{}", rendered.markup()),
    }
    Ok(())
}
