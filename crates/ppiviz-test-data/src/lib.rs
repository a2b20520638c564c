//! ppiviz-test-data
//!
//! A module to provide test files embedded in the crate for use in testing.
//! Small interaction tables and protein length/domain tables are included in the crate
//! distribution as reference fixtures.
//!
//! The test files are represented as `TestFile` objects which package the raw data
//! and create temporary files for programs to operate on.
use std::fs;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use ppiviz_test_data::TestFile;
/// let (csv_file, _temp) = TestFile::interactions_01().create_temp().unwrap();
/// let (json_file, _temp) = TestFile::proteins_01().create_temp().unwrap();
///
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// One interaction between `A` (50 residues) and `B` (150 residues),
    /// `A:[10,20]` against `B:[100,120]`, with every optional column filled.
    pub fn interactions_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/interactions_01.csv"),
            suffix: "csv",
        }
    }
    /// Lower-case partner columns and chain-style location keys. Of the five rows, one
    /// has a malformed location literal and one has an empty side.
    pub fn interactions_02() -> Self {
        Self {
            filebinary: include_bytes!("../data/interactions_02.csv"),
            suffix: "csv",
        }
    }
    /// Header only.
    pub fn interactions_empty() -> Self {
        Self {
            filebinary: include_bytes!("../data/interactions_empty.csv"),
            suffix: "csv",
        }
    }
    /// Lengths and both domain classes for `A` and `B`.
    pub fn proteins_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/proteins_01.json"),
            suffix: "json",
        }
    }
    /// Length-only table for the `interactions_02` proteins; `P1` has length 0.
    pub fn lengths_02() -> Self {
        Self {
            filebinary: include_bytes!("../data/lengths_02.csv"),
            suffix: "csv",
        }
    }

    pub fn bytes(&self) -> &'static [u8] {
        self.filebinary
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}
