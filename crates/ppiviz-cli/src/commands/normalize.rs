use super::table_cache;
use anyhow::{Context, Result};
use ppiviz_core::{normalize_rows, resolve_proteins};
use ppiviz_io::read_interactions_csv;
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

pub fn execute(interactions: PathBuf, proteins: Option<PathBuf>, output: PathBuf) -> Result<()> {
    let rows = read_interactions_csv(&interactions)?;
    let normalized = normalize_rows(&rows);
    let table = table_cache(proteins).get_or_load();
    let proteins = resolve_proteins(&normalized, table.as_ref());

    let report = json!({
        "proteins": proteins,
        "rows": normalized.rows,
        "dropped": normalized.dropped,
    });
    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)?;

    log::info!(
        "wrote {} ({} rows, {} proteins, {} dropped)",
        output.display(),
        normalized.rows.len(),
        proteins.len(),
        normalized.dropped
    );
    Ok(())
}
