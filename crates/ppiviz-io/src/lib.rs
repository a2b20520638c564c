//! ppiviz-io
//!
//! Loading of the two datasets a plot needs:
//!
//! * interaction tables (CSV) read into [`RawRow`](ppiviz_core::RawRow)s with polars
//! * protein length/domain tables (JSON or CSV), served through an explicit
//!   [`ProteinTableCache`]
//!
mod cache;
mod interactions;
mod table;

pub use self::cache::{FileTableSource, ProteinTableCache, StaticTableSource, TableSource};
pub use self::interactions::{parse_interactions_csv, read_interactions_csv};
pub use self::table::{DomainRecord, ProteinTable, TableEntry, TableError};
