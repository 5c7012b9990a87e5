//! Ledger engine
//!
//! This module replays deduplicated transactions into per-account ledgers.
//!
//! The engine enforces:
//! - chronological replay (stable sort by timestamp, ties keep input order)
//! - one ledger per [`AccountKey`], opened by the first transaction seen for it
//! - the balance rule of [`AccountLedger::apply`]: deposits always land,
//!   withdrawals land only when covered, refused withdrawals are recorded
//!
//! Rejection is a normal outcome, never an error; the engine cannot fail on
//! parser-validated input.

use crate::types::{AccountKey, AccountLedger, Outcome, Transaction};
use std::collections::HashMap;
use tracing::debug;

/// Final state of a run: one ledger per account
pub type LedgerMap = HashMap<AccountKey, AccountLedger>;

/// Sequential ledger engine
///
/// Owns every ledger exclusively while transactions are applied.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    ledgers: LedgerMap,
}

impl LedgerEngine {
    /// Create an engine with no ledgers
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one transaction to its account's ledger
    ///
    /// The ledger is created on first sight of the account key, seeded with
    /// this transaction's branch, account, bank and holder.
    pub fn apply(&mut self, transaction: Transaction) -> Outcome {
        let key = transaction.account_key();
        let ledger = self
            .ledgers
            .entry(key)
            .or_insert_with(|| AccountLedger::open_for(&transaction));

        let outcome = ledger.apply(transaction);
        if let Outcome::Rejected(record) = &outcome {
            debug!(account = %ledger.key(), "{}", record);
        }
        outcome
    }

    /// Ledgers built so far
    pub fn ledgers(&self) -> &LedgerMap {
        &self.ledgers
    }

    /// Finish the run and hand out the ledgers
    pub fn into_ledgers(self) -> LedgerMap {
        self.ledgers
    }
}

/// Order transactions by timestamp, keeping input order for equal timestamps
pub fn sort_chronologically(transactions: &mut [Transaction]) {
    // sort_by_key is stable
    transactions.sort_by_key(|transaction| transaction.timestamp);
}

/// Replay transactions exactly in the order given
///
/// No sorting happens here; callers that need chronological validation go
/// through [`compute_ledgers`].
pub fn replay<I>(transactions: I) -> LedgerMap
where
    I: IntoIterator<Item = Transaction>,
{
    let mut engine = LedgerEngine::new();
    for transaction in transactions {
        engine.apply(transaction);
    }
    engine.into_ledgers()
}

/// Compute the final ledger of every account
///
/// # Arguments
///
/// * `transactions` - Deduplicated transactions in input order
///
/// # Returns
///
/// A map from account key to finalized ledger.
pub fn compute_ledgers(mut transactions: Vec<Transaction>) -> LedgerMap {
    sort_chronologically(&mut transactions);
    replay(transactions)
}
