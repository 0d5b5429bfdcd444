use std::path::{Path, PathBuf};

use crate::error::ReportError;

use super::record::ResultRecord;
use super::sidecar;

/// Ordered, append-only outcomes of the current run.
///
/// The in-memory sequence mirrors the results file; every append rewrites
/// the file with the full sequence.
#[derive(Debug)]
pub struct Ledger {
    sidecar: PathBuf,
    records: Vec<ResultRecord>,
}

impl Ledger {
    #[must_use]
    pub const fn new(sidecar: PathBuf) -> Self {
        Self {
            sidecar,
            records: Vec::new(),
        }
    }

    /// Appends `record` and rewrites the results file.
    ///
    /// The record is kept in memory even when the rewrite fails, so the next
    /// successful write still includes it.
    ///
    /// # Errors
    ///
    /// Returns the persistence error; the in-memory append has already
    /// happened at that point.
    pub fn append(&mut self, record: ResultRecord) -> Result<(), ReportError> {
        self.records.push(record);
        sidecar::write_records(&self.sidecar, &self.records)
    }

    #[must_use]
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn sidecar_path(&self) -> &Path {
        &self.sidecar
    }
}
