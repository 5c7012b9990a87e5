//! Thread-safe ledger storage for parallel replay
//!
//! This module provides the `AsyncLedgerStore` struct, a concurrent sink for
//! finished account ledgers.
//!
//! # Design
//!
//! The store uses `DashMap` so that workers replaying different accounts can
//! publish their ledgers without a global lock. Each worker owns its ledger
//! exclusively while replaying and only hands it to the store once its account
//! is complete; the store never sees a ledger that is still being mutated.

use crate::core::engine::LedgerMap;
use crate::types::{AccountKey, AccountLedger};
use dashmap::DashMap;

/// Concurrent map of finished ledgers keyed by account
#[derive(Debug, Default)]
pub struct AsyncLedgerStore {
    /// Sharded map; writers for different accounts never contend
    ledgers: DashMap<AccountKey, AccountLedger>,
}

impl AsyncLedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            ledgers: DashMap::new(),
        }
    }

    /// Publish the finished ledger of one account
    ///
    /// Returns the ledger previously stored under the same key, which only
    /// happens if an account was (wrongly) replayed by two workers.
    pub fn publish(&self, ledger: AccountLedger) -> Option<AccountLedger> {
        self.ledgers.insert(ledger.key(), ledger)
    }

    /// Number of ledgers published so far
    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    /// Snapshot of one account's ledger
    pub fn get(&self, key: &AccountKey) -> Option<AccountLedger> {
        self.ledgers.get(key).map(|entry| entry.value().clone())
    }

    /// Consume the store into an ordinary ledger map
    pub fn into_ledgers(self) -> LedgerMap {
        self.ledgers.into_iter().collect()
    }
}
