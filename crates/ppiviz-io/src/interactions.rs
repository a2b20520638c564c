//! Interaction Tables
//!
//! Every column is read as text; typing happens in the normalization layer.
use anyhow::{Context, Result};
use polars::prelude::*;
use ppiviz_core::RawRow;
use std::io::Cursor;
use std::path::Path;

/// Reads an interaction CSV file.
pub fn read_interactions_csv(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read interaction table {}", path.display()))?;
    let rows = parse_interactions_csv(data)
        .with_context(|| format!("failed to parse interaction table {}", path.display()))?;
    log::info!("read {} interaction rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parses interaction CSV bytes. Empty cells are left out of the row.
pub fn parse_interactions_csv(data: Vec<u8>) -> Result<Vec<RawRow>> {
    let df = string_frame(data)?;
    frame_rows(&df)
}

/// Reads CSV bytes with every column typed as a string.
pub(crate) fn string_frame(data: Vec<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(data))
        .finish()
}

/// Column `name` as optional strings, or `None` when the frame lacks it.
pub(crate) fn string_column(
    df: &DataFrame,
    name: &str,
) -> PolarsResult<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let series = column.as_materialized_series().cast(&DataType::String)?;
    Ok(Some(
        series
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect(),
    ))
}

fn frame_rows(df: &DataFrame) -> Result<Vec<RawRow>> {
    let mut rows = vec![RawRow::new(); df.height()];
    for name in df.get_column_names() {
        let name = name.to_string();
        let Some(values) = string_column(df, &name)? else {
            continue;
        };
        for (row, value) in rows.iter_mut().zip(values) {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                row.insert(name.clone(), value);
            }
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppiviz_core::{PROTEIN1_FIELDS, PROTEIN2_FIELDS};
    use ppiviz_test_data::TestFile;

    #[test]
    fn test_read_interactions() {
        let (csv_file, _temp) = TestFile::interactions_01().create_temp().unwrap();
        let rows = read_interactions_csv(csv_file).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(PROTEIN1_FIELDS), Some("A"));
        assert_eq!(
            rows[0].get(&["absolute_location"]),
            Some("{'Protein1': [10, 11, 12, 20], 'Protein2': [100, 101, 102, 120]}")
        );
        assert_eq!(rows[0].get(&["iptm"]), Some("0.8312"));
    }

    #[test]
    fn test_lowercase_columns_and_empty_cells() {
        let rows = parse_interactions_csv(TestFile::interactions_02().bytes().to_vec()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].get(PROTEIN2_FIELDS), Some("P1"));
        assert_eq!(rows[3].get(&["iptm"]), None);
    }

    #[test]
    fn test_header_only() {
        let rows = parse_interactions_csv(TestFile::interactions_empty().bytes().to_vec()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(read_interactions_csv("/nonexistent/interactions.csv").is_err());
    }
}
