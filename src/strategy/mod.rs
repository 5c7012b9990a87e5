//! Processing strategy module for the ledger pipeline
//!
//! This module defines the Strategy pattern for the complete pipeline:
//! reading the operations file, parsing and deduplicating its lines, and
//! replaying the surviving transactions into per-account ledgers. Different
//! implementations (sequential, partitioned parallel) can be selected at
//! runtime and produce the same ledgers for the same input.

use crate::cli::{AmountColumn, StatementFormat, StrategyType};
use crate::core::{Deduplicator, LedgerMap, ProcessingReport};
use crate::io::{write_statement, LineResult};
use crate::types::{LedgerError, Transaction};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Everything one pipeline run produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerRun {
    pub ledgers: LedgerMap,
    pub report: ProcessingReport,
}

/// Processing strategy trait for the complete ledger pipeline
///
/// Each strategy must be able to read an operations file, turn its lines
/// into transactions, and replay them into final account ledgers.
pub trait ProcessingStrategy: Send + Sync {
    /// Compute ledgers and ingest statistics for an input file
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the operations file
    /// * `policy` - How to decide whether the file carries an amount column
    ///
    /// # Returns
    ///
    /// * `Ok(LedgerRun)` if the file was read to the end
    /// * `Err(LedgerError)` if a fatal error occurred (file not found, I/O error, task failure)
    ///
    /// Malformed lines are not fatal: they are recorded in the report and
    /// the run continues with the next line.
    fn run(&self, input_path: &Path, policy: AmountColumn) -> Result<LedgerRun, LedgerError>;

    /// Run the pipeline and write the statement to `output`
    fn process(
        &self,
        input_path: &Path,
        policy: AmountColumn,
        format: StatementFormat,
        output: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        let run = self.run(input_path, policy)?;
        write_statement(&run.ledgers, &run.report, format, output)?;
        output.flush().map_err(LedgerError::write_failed)?;
        Ok(())
    }
}

/// Ingest stage shared by every strategy
///
/// Folds parse results into the report and feeds valid transactions through
/// the deduplicator, keeping first occurrences in input order.
#[derive(Debug, Default)]
pub struct IngestCollector {
    report: ProcessingReport,
    dedup: Deduplicator,
}

impl IngestCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one data line
    pub fn accept(&mut self, result: LineResult) {
        self.report.lines_read += 1;
        match result {
            Ok(transaction) => {
                if !self.dedup.push(transaction) {
                    debug!("duplicate transaction dropped");
                }
            }
            Err(e) => {
                debug!("{}", e);
                self.report.errors.push(e);
            }
        }
    }

    /// Close the ingest stage
    ///
    /// Returns the unique transactions in input order and the final report.
    pub fn finish(self) -> (Vec<Transaction>, ProcessingReport) {
        let mut report = self.report;
        report.duplicates_removed = self.dedup.removed();

        info!(
            lines_read = report.lines_read,
            errors = report.error_count(),
            duplicates_removed = report.duplicates_removed,
            valid = report.valid_transactions(),
            "input processed"
        );

        (self.dedup.into_unique(), report)
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for the async strategy (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
