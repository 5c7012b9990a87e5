//! Account ledger types for the ledger engine
//!
//! This module defines the per-account aggregate that the engine mutates while
//! replaying transactions, together with the balance-validation rule that
//! decides whether each transaction is accepted or rejected.

use super::transaction::{AccountKey, OperationKind, Transaction};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Timestamp pattern used in human-readable rejection descriptions
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Why a transaction was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The withdrawal exceeds the current balance
    InsufficientFunds,

    /// Applying the amount would leave the representable decimal range
    BalanceOverflow,
}

/// A refused transaction, recorded for the statement
///
/// Purely observational: once recorded it is never re-evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectionRecord {
    pub kind: OperationKind,
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,

    /// Balance of the account at the moment the transaction was refused
    pub balance: Decimal,

    pub reason: RejectionReason,
}

fn cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for RejectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.timestamp.format(DISPLAY_TIMESTAMP_FORMAT);
        match self.reason {
            RejectionReason::InsufficientFunds => write!(
                f,
                "{} REJECTED: {:.2} at {} - available balance: {:.2}",
                self.kind,
                cents(self.amount),
                timestamp,
                cents(self.balance)
            ),
            RejectionReason::BalanceOverflow => write!(
                f,
                "{} REJECTED: {:.2} at {} - balance would overflow (balance: {:.2})",
                self.kind,
                cents(self.amount),
                timestamp,
                cents(self.balance)
            ),
        }
    }
}

/// Result of applying one transaction to a ledger
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The transaction was applied; carries the new balance
    Accepted(Decimal),

    /// The transaction was refused; the balance is unchanged
    Rejected(RejectionRecord),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

/// Per-account aggregate of balance, accepted history and rejections
///
/// Invariant: `balance` equals the sum of accepted deposits minus the sum of
/// accepted withdrawals, and never becomes negative.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountLedger {
    branch: String,
    account: String,
    bank: String,

    /// Holder name from the transaction that opened this ledger
    holder: String,

    balance: Decimal,

    /// Accepted transactions in the order they were applied
    accepted: Vec<Transaction>,

    rejections: Vec<RejectionRecord>,
}

impl AccountLedger {
    /// Create an empty ledger with a zero balance
    pub fn new(
        branch: impl Into<String>,
        account: impl Into<String>,
        bank: impl Into<String>,
        holder: impl Into<String>,
    ) -> Self {
        AccountLedger {
            branch: branch.into(),
            account: account.into(),
            bank: bank.into(),
            holder: holder.into(),
            balance: Decimal::ZERO,
            accepted: Vec::new(),
            rejections: Vec::new(),
        }
    }

    /// Open a ledger seeded with the identity fields of its first transaction
    pub fn open_for(transaction: &Transaction) -> Self {
        AccountLedger::new(
            &transaction.branch,
            &transaction.account,
            &transaction.bank,
            &transaction.holder,
        )
    }

    /// Apply one transaction through the balance-validation rule
    ///
    /// Deposits are always accepted. A withdrawal is accepted iff the balance
    /// covers it (a withdrawal draining the account to exactly zero is
    /// allowed); otherwise it is rejected and the balance is left untouched.
    pub fn apply(&mut self, transaction: Transaction) -> Outcome {
        let new_balance = match transaction.kind {
            OperationKind::Deposit => self.balance.checked_add(transaction.amount),
            OperationKind::Withdrawal => {
                if self.balance < transaction.amount {
                    return self.reject(&transaction, RejectionReason::InsufficientFunds);
                }
                self.balance.checked_sub(transaction.amount)
            }
        };

        match new_balance {
            Some(balance) => {
                self.balance = balance;
                self.accepted.push(transaction);
                Outcome::Accepted(balance)
            }
            None => self.reject(&transaction, RejectionReason::BalanceOverflow),
        }
    }

    fn reject(&mut self, transaction: &Transaction, reason: RejectionReason) -> Outcome {
        let record = RejectionRecord {
            kind: transaction.kind,
            amount: transaction.amount,
            timestamp: transaction.timestamp,
            balance: self.balance,
            reason,
        };
        self.rejections.push(record.clone());
        Outcome::Rejected(record)
    }

    pub fn key(&self) -> AccountKey {
        AccountKey::new(&self.branch, &self.account, &self.bank)
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn bank(&self) -> &str {
        &self.bank
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Accepted transactions in applied order
    pub fn accepted(&self) -> &[Transaction] {
        &self.accepted
    }

    /// Rejections in the order they occurred
    pub fn rejections(&self) -> &[RejectionRecord] {
        &self.rejections
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejections.is_empty()
    }
}
