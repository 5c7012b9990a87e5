//! Rust Ledger Engine Library
//! # Overview
//!
//! This library computes per-account balances from a file of bank
//! operations, with a sequential strategy and a partitioned parallel one.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, AccountKey, AccountLedger, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`io`] - Line parsing, file readers and statement rendering
//! - [`core`] - Business logic components:
//!   - [`core::dedup`] - Removal of exact duplicate records
//!   - [`core::engine`] - Chronological replay into account ledgers
//!   - [`core::async`] - The same replay, one task per account
//! - [`strategy`] - Complete pipelines selectable at runtime
//!
//! # Processing Rules
//!
//! - Every line is parsed into a transaction or rejected with a line error.
//! - Exact duplicates (all seven fields equal) are dropped, keeping the first.
//! - Transactions are replayed in timestamp order; ties keep input order.
//! - A withdrawal larger than the available balance is rejected and leaves
//!   the balance unchanged, so no balance ever goes negative.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{compute_ledgers, dedup, LedgerEngine, LedgerMap, ProcessingReport};
pub use io::{parse_line, write_statement};
pub use strategy::{create_strategy, LedgerRun, ProcessingStrategy};
pub use types::{
    AccountKey, AccountLedger, LedgerError, LineError, OperationKind, ParseError, Transaction,
};
