//! Parallel implementations of core components
//!
//! This module provides the account-partitioned replay used by the async
//! processing strategy.
//!
//! # Architecture
//!
//! - **AsyncLedgerStore**: Thread-safe sink for finished ledgers using DashMap
//! - **PartitionProcessor**: Partitions by account and replays each account
//!   in its own task
//!
//! # Thread Safety
//!
//! Distinct accounts never share mutable state. Every account is replayed by
//! a single task in chronological order, so parallelism never reorders the
//! transactions of one account.

pub mod ledger_store;
pub mod partition_processor;

pub use ledger_store::AsyncLedgerStore;
pub use partition_processor::PartitionProcessor;
