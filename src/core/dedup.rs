//! Order-preserving removal of exact duplicate transactions
//!
//! Two transactions are duplicates when every field matches (see
//! [`Transaction`]'s equality). The first occurrence wins and the relative
//! order of first occurrences is kept, because input order is what breaks
//! timestamp ties in the ledger engine.

use crate::types::Transaction;
use std::collections::HashSet;

/// Incremental deduplicator
///
/// Accepts transactions one at a time, so that it can sit directly behind a
/// streaming reader, and remembers how many duplicates it dropped.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<Transaction>,
    unique: Vec<Transaction>,
    removed: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a transaction
    ///
    /// Returns `true` if it was kept, `false` if it duplicated an earlier one.
    pub fn push(&mut self, transaction: Transaction) -> bool {
        if self.seen.contains(&transaction) {
            self.removed += 1;
            return false;
        }
        self.seen.insert(transaction.clone());
        self.unique.push(transaction);
        true
    }

    /// Number of duplicates dropped so far
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Unique transactions in first-seen order
    pub fn into_unique(self) -> Vec<Transaction> {
        self.unique
    }
}

/// Remove exact duplicates, keeping first occurrences in their original order
pub fn dedup(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut deduplicator = Deduplicator::new();
    for transaction in transactions {
        deduplicator.push(transaction);
    }
    deduplicator.into_unique()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationKind;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn tx(account: &str, kind: OperationKind, minute: u32, cents: i64) -> Transaction {
        Transaction {
            branch: "0001".to_string(),
            account: account.to_string(),
            bank: "ACME".to_string(),
            holder: "Alice".to_string(),
            kind,
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, minute, 0)
                .unwrap(),
            amount: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_identical_transactions_collapse_to_one() {
        let a = tx("100", OperationKind::Deposit, 0, 10000);

        let unique = dedup(vec![a.clone(), a.clone()]);

        assert_eq!(unique, vec![a]);
    }

    #[test]
    fn test_first_occurrence_order_is_preserved() {
        let a = tx("100", OperationKind::Deposit, 5, 100);
        let b = tx("200", OperationKind::Deposit, 1, 100);
        let c = tx("100", OperationKind::Withdrawal, 3, 50);

        let unique = dedup(vec![a.clone(), b.clone(), a.clone(), c.clone(), b.clone()]);

        assert_eq!(unique, vec![a, b, c]);
    }

    #[test]
    fn test_differing_amount_is_not_a_duplicate() {
        let a = tx("100", OperationKind::Deposit, 0, 10000);
        let b = tx("100", OperationKind::Deposit, 0, 20000);

        assert_eq!(dedup(vec![a.clone(), b.clone()]), vec![a, b]);
    }

    #[test]
    fn test_differing_holder_is_not_a_duplicate() {
        let a = tx("100", OperationKind::Deposit, 0, 10000);
        let mut b = a.clone();
        b.holder = "Alice Smith".to_string();

        assert_eq!(dedup(vec![a.clone(), b.clone()]).len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let input = vec![
            tx("100", OperationKind::Deposit, 0, 100),
            tx("100", OperationKind::Deposit, 0, 100),
            tx("200", OperationKind::Withdrawal, 2, 100),
            tx("100", OperationKind::Deposit, 1, 100),
            tx("200", OperationKind::Withdrawal, 2, 100),
        ];

        let once = dedup(input);
        let twice = dedup(once.clone());

        assert_eq!(once.len(), 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deduplicator_counts_removals() {
        let a = tx("100", OperationKind::Deposit, 0, 100);
        let mut deduplicator = Deduplicator::new();

        assert!(deduplicator.push(a.clone()));
        assert!(!deduplicator.push(a.clone()));
        assert!(!deduplicator.push(a));

        assert_eq!(deduplicator.removed(), 2);
        assert_eq!(deduplicator.into_unique().len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup(Vec::new()).is_empty());
    }
}
