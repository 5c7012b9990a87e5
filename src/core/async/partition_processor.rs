//! Account-partitioned parallel replay
//!
//! This module provides the `PartitionProcessor`, which replays independent
//! accounts concurrently while keeping every single account strictly
//! sequential.
//!
//! # Design
//!
//! Transactions are first sorted chronologically over the whole run (stable,
//! so ties keep input order), then partitioned by [`AccountKey`]. Each
//! partition keeps the sorted order and is replayed by exactly one tokio task,
//! which exclusively owns that account's ledger until it is published to the
//! [`AsyncLedgerStore`].
//!
//! # Architecture
//!
//! ```text
//! PartitionProcessor
//!     ├── Arc<AsyncLedgerStore>  (sink for finished ledgers)
//!     └── one task per AccountKey (sequential replay of that account)
//! ```
//!
//! The result is identical to the sequential engine's: the order of
//! transactions within each account is the same, and accounts never share
//! state.

use super::AsyncLedgerStore;
use crate::core::engine::{sort_chronologically, LedgerMap};
use crate::types::{AccountKey, AccountLedger, LedgerError, Outcome, Transaction};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parallel ledger engine with account-based partitioning
#[derive(Debug, Default)]
pub struct PartitionProcessor {
    store: Arc<AsyncLedgerStore>,
}

impl PartitionProcessor {
    /// Create a processor with an empty ledger store
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition transactions by account key
    ///
    /// # Guarantees
    ///
    /// - Each transaction appears in exactly one partition
    /// - Transactions for each account keep their relative order
    pub fn partition_by_account(
        transactions: Vec<Transaction>,
    ) -> HashMap<AccountKey, Vec<Transaction>> {
        let mut partitions: HashMap<AccountKey, Vec<Transaction>> = HashMap::new();

        for transaction in transactions {
            partitions
                .entry(transaction.account_key())
                .or_default()
                .push(transaction);
        }

        partitions
    }

    /// Replay one account's transactions in the order given
    ///
    /// Returns `None` for an empty partition.
    pub fn replay_account(transactions: Vec<Transaction>) -> Option<AccountLedger> {
        let mut iter = transactions.into_iter();
        let first = iter.next()?;

        let mut ledger = AccountLedger::open_for(&first);
        for transaction in std::iter::once(first).chain(iter) {
            if let Outcome::Rejected(record) = ledger.apply(transaction) {
                debug!(account = %ledger.key(), "{}", record);
            }
        }

        Some(ledger)
    }

    /// Compute every account's ledger, one task per account
    ///
    /// # Arguments
    ///
    /// * `transactions` - Deduplicated transactions in input order
    ///
    /// # Returns
    ///
    /// * `Ok(LedgerMap)` with the same content the sequential engine produces
    /// * `Err(LedgerError::Runtime)` if a worker task failed
    pub async fn compute_ledgers(
        self,
        mut transactions: Vec<Transaction>,
    ) -> Result<LedgerMap, LedgerError> {
        sort_chronologically(&mut transactions);
        let partitions = Self::partition_by_account(transactions);
        debug!(accounts = partitions.len(), "replaying accounts in parallel");

        let tasks: Vec<_> = partitions
            .into_values()
            .map(|partition| {
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    if let Some(ledger) = Self::replay_account(partition) {
                        store.publish(ledger);
                    }
                })
            })
            .collect();

        for result in join_all(tasks).await {
            if let Err(e) = result {
                warn!("Account replay task failed: {}", e);
                return Err(LedgerError::runtime(format!(
                    "account replay task failed: {}",
                    e
                )));
            }
        }

        let store = Arc::try_unwrap(self.store)
            .map_err(|_| LedgerError::runtime("ledger store is still shared"))?;
        Ok(store.into_ledgers())
    }
}
