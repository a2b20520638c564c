use super::table_cache;
use anyhow::{Context, Result};
use ppiviz_chord::{ChordConfig, ChordPlot};
use ppiviz_io::read_interactions_csv;
use std::path::PathBuf;

const TARGET: &str = "cli";

pub fn execute(
    interactions: PathBuf,
    proteins: Option<PathBuf>,
    output: PathBuf,
    config: ChordConfig,
) -> Result<()> {
    let rows = read_interactions_csv(&interactions)?;
    let plot = ChordPlot::new(table_cache(proteins));
    let status = plot.render(&rows, TARGET, &config);

    let rendered = plot
        .surface(TARGET)
        .content()
        .context("render produced no output")?;
    if rendered.scene().is_none() {
        log::warn!("{}: {}", interactions.display(), rendered.markup());
    }
    std::fs::write(&output, rendered.to_document(config.size).to_string())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!(
        "wrote {} ({} arcs, {} chords, {} rows dropped)",
        output.display(),
        status.arcs,
        status.chords,
        status.dropped
    );
    Ok(())
}
