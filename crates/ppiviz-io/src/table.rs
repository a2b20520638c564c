//! Protein Length / Domain Table
//!
//! JSON layout, keyed by protein name:
//!
//! ```json
//! {"P12345": {"length": 350,
//!             "predicted": [{"id": "domain_1", "start": 1, "end": 120}],
//!             "curated":   [{"id": "Kinase_1", "start": 40, "end": 300}]}}
//! ```
//!
//! A CSV with `protein` and `length` columns is accepted as a length-only table.
use crate::interactions::{string_column, string_frame};
use polars::prelude::PolarsError;
use ppiviz_core::{Domain, DomainProvider, DomainSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Polars(#[from] PolarsError),

    #[error("protein table is missing the '{0}' column")]
    MissingColumn(String),

    #[error("unsupported protein table format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub id: String,
    pub start: i64,
    pub end: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub predicted: Vec<DomainRecord>,
    #[serde(default)]
    pub curated: Vec<DomainRecord>,
}

/// Per-protein lengths and domain calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProteinTable {
    entries: HashMap<String, TableEntry>,
}

impl ProteinTable {
    pub fn from_json_slice(data: &[u8]) -> Result<Self, TableError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Reads a length-only table from CSV bytes with `protein` and `length` columns.
    pub fn from_csv_slice(data: &[u8]) -> Result<Self, TableError> {
        let df = string_frame(data.to_vec())?;
        let column = |candidates: &[&str]| -> Result<Vec<Option<String>>, TableError> {
            for name in candidates {
                if let Some(values) = string_column(&df, name)? {
                    return Ok(values);
                }
            }
            Err(TableError::MissingColumn(candidates[0].to_string()))
        };
        let names = column(&["protein", "Protein", "name"])?;
        let lengths = column(&["length", "Length"])?;

        let entries = names
            .into_iter()
            .zip(lengths)
            .filter_map(|(name, length)| {
                let name = name?.trim().to_string();
                let length = length.and_then(|l| l.trim().parse::<f64>().ok());
                Some((
                    name,
                    TableEntry {
                        length: length.filter(|l| *l >= 0.0).map(|l| l as u32),
                        ..TableEntry::default()
                    },
                ))
            })
            .collect();
        Ok(ProteinTable { entries })
    }

    pub fn insert(&mut self, protein: impl Into<String>, entry: TableEntry) {
        self.entries.insert(protein.into(), entry);
    }

    pub fn get(&self, protein: &str) -> Option<&TableEntry> {
        self.entries.get(protein)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DomainProvider for ProteinTable {
    fn length(&self, protein: &str) -> Option<u32> {
        self.get(protein)?.length
    }

    fn domains(&self, protein: &str) -> Vec<Domain> {
        let Some(entry) = self.get(protein) else {
            return vec![];
        };
        let tagged = |records: &[DomainRecord], source: DomainSource| {
            records
                .iter()
                .map(|record| Domain {
                    id: record.id.clone(),
                    start: record.start,
                    end: record.end,
                    source,
                })
                .collect::<Vec<_>>()
        };
        let mut domains = tagged(&entry.predicted, DomainSource::Predicted);
        domains.extend(tagged(&entry.curated, DomainSource::Curated));
        domains
    }
}
