//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. The file is read in batches on a tokio runtime,
//! and the replay runs one task per account.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batched line reading)
//!     ├── IngestCollector (report + deduplication, in file order)
//!     └── PartitionProcessor (one task per AccountKey)
//!         └── AsyncLedgerStore (DashMap of finished ledgers)
//! ```
//!
//! # Ordering
//!
//! Batches are folded into the collector in file order, so deduplication
//! keeps the same first occurrences the sync strategy keeps. Parallelism
//! only starts after the global chronological sort, and never splits an
//! account across tasks, so both strategies produce the same ledgers.

use crate::cli::AmountColumn;
use crate::core::PartitionProcessor;
use crate::io::AsyncReader;
use crate::strategy::{IngestCollector, LedgerRun, ProcessingStrategy};
use crate::types::LedgerError;
use std::path::Path;
use tokio::io::BufReader;
use tracing::{info, warn};

/// Read buffer size for input files
const READ_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Configuration for batch processing
///
/// Controls how many lines are read per batch and the number of worker
/// threads available to the per-account replay tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of lines per read batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// A zero value is replaced by its default and logged as a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// # Thread Safety
///
/// AsyncProcessingStrategy is Send + Sync. Each call to `run` builds its own
/// multi-threaded runtime, sized by `BatchConfig::max_concurrent_batches`.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    async fn run_async(
        &self,
        input_path: &Path,
        policy: AmountColumn,
    ) -> Result<LedgerRun, LedgerError> {
        let file = tokio::fs::File::open(input_path)
            .await
            .map_err(|e| LedgerError::open_failed(input_path, e))?;

        let mut reader =
            AsyncReader::new(BufReader::with_capacity(READ_BUFFER_CAPACITY, file), policy).await?;
        let layout = reader.layout();
        info!(
            path = %input_path.display(),
            header = layout.has_header,
            amount_column = layout.has_amount,
            batch_size = self.config.batch_size,
            "reading operations"
        );

        let mut collector = IngestCollector::new();
        loop {
            let batch = reader.read_batch(self.config.batch_size).await?;

            // An empty batch means end of file
            if batch.is_empty() {
                break;
            }

            for result in batch {
                collector.accept(result);
            }
        }

        let (transactions, report) = collector.finish();
        let ledgers = PartitionProcessor::new()
            .compute_ledgers(transactions)
            .await?;
        info!(accounts = ledgers.len(), "ledgers computed");

        Ok(LedgerRun { ledgers, report })
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn run(&self, input_path: &Path, policy: AmountColumn) -> Result<LedgerRun, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| LedgerError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(self.run_async(input_path, policy))
    }
}
