//! Transaction-related types for the ledger engine
//!
//! This module defines the canonical transaction record produced by the line
//! parser, the operation kinds it may carry, and the account key used to
//! group transactions into ledgers.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Operation kinds accepted in the input file
///
/// The literal values are case-sensitive: `DEPOSIT` and `WITHDRAWAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Credit funds to an account. Always accepted.
    Deposit,

    /// Debit funds from an account
    ///
    /// Accepted only when the current balance covers the full amount.
    Withdrawal,
}

impl OperationKind {
    /// Parse an operation literal exactly as it appears in the input file
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "DEPOSIT" => Some(OperationKind::Deposit),
            "WITHDRAWAL" => Some(OperationKind::Withdrawal),
            _ => None,
        }
    }

    /// The literal used for this kind in input files and statements
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "DEPOSIT",
            OperationKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an account: (branch, account number, bank)
///
/// The holder name is informational and deliberately not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey {
    pub branch: String,
    pub account: String,
    pub bank: String,
}

impl AccountKey {
    pub fn new(
        branch: impl Into<String>,
        account: impl Into<String>,
        bank: impl Into<String>,
    ) -> Self {
        AccountKey {
            branch: branch.into(),
            account: account.into(),
            bank: bank.into(),
        }
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.branch, self.account, self.bank)
    }
}

/// A validated, immutable financial event
///
/// Two transactions are equal iff every field is equal, amount included.
/// Amounts compare numerically, so `10.0` and `10.00` are the same amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    /// Branch identifier
    pub branch: String,

    /// Account number within the branch
    pub account: String,

    /// Bank identifier
    pub bank: String,

    /// Account holder name as written on this line
    pub holder: String,

    /// Deposit or withdrawal
    pub kind: OperationKind,

    /// Date and time of the operation, second precision
    pub timestamp: NaiveDateTime,

    /// Strictly positive amount
    ///
    /// Defaults to one when the input file has no amount column.
    pub amount: Decimal,
}

impl Transaction {
    /// The account this transaction belongs to
    pub fn account_key(&self) -> AccountKey {
        AccountKey::new(&self.branch, &self.account, &self.bank)
    }

    /// Whether this transaction belongs to the given account
    pub fn belongs_to(&self, key: &AccountKey) -> bool {
        self.branch == key.branch && self.account == key.account && self.bank == key.bank
    }
}
