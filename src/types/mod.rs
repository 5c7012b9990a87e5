//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transactions, operation kinds and account keys
//! - `account`: Per-account ledgers and the balance-validation rule
//! - `error`: Parse and fatal error types

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{
    AccountLedger, Outcome, RejectionReason, RejectionRecord, DISPLAY_TIMESTAMP_FORMAT,
};
pub use error::{LedgerError, LineError, ParseError};
pub use transaction::{AccountKey, OperationKind, Transaction};
