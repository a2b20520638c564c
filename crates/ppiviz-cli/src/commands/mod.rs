pub mod normalize;
pub mod render;

use ppiviz_io::{FileTableSource, ProteinTableCache};
use std::path::PathBuf;

/// Cache over the protein table, or an empty one when no table was given.
pub(crate) fn table_cache(proteins: Option<PathBuf>) -> ProteinTableCache {
    match proteins {
        Some(path) => ProteinTableCache::new(FileTableSource::new(path)),
        None => {
            log::info!("no protein table given, lengths come from the interaction rows");
            ProteinTableCache::empty()
        }
    }
}
