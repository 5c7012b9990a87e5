//! Core business logic module
//!
//! This module contains the ledger computation components:
//! - `dedup` - Order-preserving removal of duplicate transactions
//! - `engine` - Chronological replay into per-account ledgers
//! - `report` - Ingest statistics (lines read, parse errors, duplicates)
//! - `async` - Account-partitioned parallel replay

pub mod r#async;
pub mod dedup;
pub mod engine;
pub mod report;

pub use dedup::{dedup, Deduplicator};
pub use engine::{compute_ledgers, replay, sort_chronologically, LedgerEngine, LedgerMap};
pub use r#async::{AsyncLedgerStore, PartitionProcessor};
pub use report::ProcessingReport;
