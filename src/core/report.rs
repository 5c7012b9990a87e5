//! Ingest statistics
//!
//! Collects what happened to every data line between the reader and the
//! ledger engine: parsed, rejected by the parser, or dropped as a duplicate.

use crate::types::LineError;

/// Aggregate result of reading, parsing and deduplicating one input file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingReport {
    /// Data lines consumed (the header is not counted)
    pub lines_read: usize,

    /// Parse errors in file order
    pub errors: Vec<LineError>,

    /// Transactions dropped as exact duplicates
    pub duplicates_removed: usize,
}

impl ProcessingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Transactions handed to the ledger engine
    pub fn valid_transactions(&self) -> usize {
        self.lines_read
            .saturating_sub(self.errors.len())
            .saturating_sub(self.duplicates_removed)
    }
}
