//! Protein Table Cache
//!
//! A single-slot cache owned by whoever renders. Only successful fetches are kept; a
//! failed fetch degrades to an empty table so the plot can still draw with fallback
//! lengths, and the next call tries again.
use crate::table::{ProteinTable, TableError};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Somewhere a protein table can be fetched from.
pub trait TableSource: Send + Sync {
    fn fetch(&self) -> Result<ProteinTable, TableError>;
    fn describe(&self) -> String;
}

/// Reads a `.json` or `.csv` protein table from disk on every fetch.
#[derive(Clone, Debug)]
pub struct FileTableSource {
    path: PathBuf,
}

impl FileTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for FileTableSource {
    fn fetch(&self) -> Result<ProteinTable, TableError> {
        let data = std::fs::read(&self.path)?;
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ProteinTable::from_json_slice(&data),
            Some("csv") => ProteinTable::from_csv_slice(&data),
            other => Err(TableError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A table already in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticTableSource(pub ProteinTable);

impl TableSource for StaticTableSource {
    fn fetch(&self) -> Result<ProteinTable, TableError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} proteins)", self.0.len())
    }
}

pub struct ProteinTableCache {
    source: Box<dyn TableSource>,
    slot: RwLock<Option<Arc<ProteinTable>>>,
}

impl ProteinTableCache {
    pub fn new(source: impl TableSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            slot: RwLock::new(None),
        }
    }

    /// Cache with nothing to fetch; every lookup misses.
    pub fn empty() -> Self {
        Self::new(StaticTableSource::default())
    }

    /// Returns the cached table, fetching it on first use.
    pub fn get_or_load(&self) -> Arc<ProteinTable> {
        if let Some(table) = self.cached() {
            return table;
        }
        self.load()
    }

    /// Forces a fetch, replacing the cached table on success.
    pub fn refresh(&self) -> Arc<ProteinTable> {
        self.load()
    }

    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cached().is_some()
    }

    fn cached(&self) -> Option<Arc<ProteinTable>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn load(&self) -> Arc<ProteinTable> {
        match self.source.fetch() {
            Ok(table) => {
                log::info!(
                    "loaded protein table from {} ({} proteins)",
                    self.source.describe(),
                    table.len()
                );
                let table = Arc::new(table);
                *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(table.clone());
                table
            }
            Err(err) => {
                log::warn!(
                    "failed to load protein table from {}: {}; using an empty table",
                    self.source.describe(),
                    err
                );
                Arc::new(ProteinTable::default())
            }
        }
    }
}
