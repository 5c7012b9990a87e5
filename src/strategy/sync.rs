//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates the run by coordinating between
//! the SyncReader (line input), the ingest collector (report and
//! deduplication) and the sequential ledger engine.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - line reading and parsing to `SyncReader` (iterator interface)
//! - duplicate removal and statistics to `IngestCollector`
//! - chronological replay to `core::compute_ledgers`
//!
//! The whole file is ingested before replay starts, because the engine has
//! to see every transaction to sort them.

use crate::cli::AmountColumn;
use crate::core::compute_ledgers;
use crate::io::SyncReader;
use crate::strategy::{IngestCollector, LedgerRun, ProcessingStrategy};
use crate::types::LedgerError;
use std::path::Path;
use tracing::info;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_ledger_engine::cli::{AmountColumn, StatementFormat};
/// use rust_ledger_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// match strategy.process(
///     Path::new("operations.csv"),
///     AmountColumn::Auto,
///     StatementFormat::Summary,
///     &mut output,
/// ) {
///     Ok(()) => {}
///     Err(e) => eprintln!("Fatal error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn run(&self, input_path: &Path, policy: AmountColumn) -> Result<LedgerRun, LedgerError> {
        let reader = SyncReader::open(input_path, policy)?;
        let layout = reader.layout();
        info!(
            path = %input_path.display(),
            header = layout.has_header,
            amount_column = layout.has_amount,
            "reading operations"
        );

        let mut collector = IngestCollector::new();
        for result in reader {
            collector.accept(result?);
        }

        let (transactions, report) = collector.finish();
        let ledgers = compute_ledgers(transactions);
        info!(accounts = ledgers.len(), "ledgers computed");

        Ok(LedgerRun { ledgers, report })
    }
}
