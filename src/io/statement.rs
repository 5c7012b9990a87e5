//! Statement rendering for computed ledgers
//!
//! This module centralizes all output formatting, providing:
//! - the ingest report (lines read, parse errors, duplicates)
//! - a full extract with per-account history and running balances
//! - a one-line-per-account summary
//! - machine-readable CSV balances
//!
//! Rendering never mutates ledgers. All money is printed with two decimals,
//! rounded half away from zero.

use crate::cli::StatementFormat;
use crate::core::{LedgerMap, ProcessingReport};
use crate::types::{AccountLedger, LedgerError, OperationKind, DISPLAY_TIMESTAMP_FORMAT};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::{self, Write};

const WIDTH: usize = 80;

/// One row of the CSV balance output
#[derive(Debug, Serialize, PartialEq)]
pub struct BalanceRow {
    pub branch: String,
    pub account: String,
    pub bank: String,
    pub holder: String,
    pub balance: String,
    pub accepted: usize,
    pub rejected: usize,
}

impl From<&AccountLedger> for BalanceRow {
    fn from(ledger: &AccountLedger) -> Self {
        BalanceRow {
            branch: ledger.branch().to_string(),
            account: ledger.account().to_string(),
            bank: ledger.bank().to_string(),
            holder: ledger.holder().to_string(),
            balance: money(ledger.balance()),
            accepted: ledger.accepted().len(),
            rejected: ledger.rejections().len(),
        }
    }
}

/// Format an amount with exactly two decimals
pub fn money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Ledgers ordered by holder name, ties broken by account key
fn by_holder(ledgers: &LedgerMap) -> Vec<&AccountLedger> {
    let mut sorted: Vec<&AccountLedger> = ledgers.values().collect();
    sorted.sort_by(|a, b| {
        a.holder()
            .cmp(b.holder())
            .then_with(|| a.key().cmp(&b.key()))
    });
    sorted
}

/// Write the statement in the requested format
///
/// The ingest report precedes the extract and summary formats; the CSV
/// format carries balances only.
pub fn write_statement(
    ledgers: &LedgerMap,
    report: &ProcessingReport,
    format: StatementFormat,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match format {
        StatementFormat::Extract => {
            write_processing_report(report, output)?;
            write_extract(ledgers, output)
        }
        StatementFormat::Summary => {
            write_processing_report(report, output)?;
            write_summary(ledgers, output)
        }
        StatementFormat::Csv => write_balances_csv(ledgers, output),
    }
}

/// Write ingest statistics and every parse error with its line number
pub fn write_processing_report(
    report: &ProcessingReport,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    render_processing_report(report, output).map_err(LedgerError::write_failed)
}

fn render_processing_report(report: &ProcessingReport, output: &mut dyn Write) -> io::Result<()> {
    writeln!(output, "=== PROCESSING REPORT ===")?;
    writeln!(output, "Lines read          : {}", report.lines_read)?;
    writeln!(output, "Lines with errors   : {}", report.error_count())?;
    writeln!(output, "Duplicates removed  : {}", report.duplicates_removed)?;
    writeln!(output, "Valid transactions  : {}", report.valid_transactions())?;

    if !report.errors.is_empty() {
        writeln!(output)?;
        writeln!(output, "Errors found:")?;
        for error in &report.errors {
            writeln!(output, "  {}", error)?;
        }
    }

    Ok(())
}

/// Write the full extract
///
/// For each account: identity, accepted history with the running balance
/// after each entry, refused withdrawals, and the final balance. Ends with the
/// grand total and the number of refused transactions.
pub fn write_extract(ledgers: &LedgerMap, output: &mut dyn Write) -> Result<(), LedgerError> {
    render_extract(ledgers, output).map_err(LedgerError::write_failed)
}

fn render_extract(ledgers: &LedgerMap, output: &mut dyn Write) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", "=".repeat(WIDTH))?;
    writeln!(output, "BANK STATEMENT - FINAL ACCOUNT BALANCES")?;
    writeln!(output, "{}", "=".repeat(WIDTH))?;

    let mut grand_total = Decimal::ZERO;
    let mut rejected_total = 0usize;

    for ledger in by_holder(ledgers) {
        writeln!(output)?;
        writeln!(output, "{}", "=".repeat(WIDTH))?;
        writeln!(output, "Holder: {}", ledger.holder())?;
        writeln!(
            output,
            "Branch: {} | Account: {} | Bank: {}",
            ledger.branch(),
            ledger.account(),
            ledger.bank()
        )?;
        writeln!(output, "{}", "-".repeat(WIDTH))?;
        writeln!(output, "Operation history:")?;

        let mut running = Decimal::ZERO;
        for transaction in ledger.accepted() {
            let marker = match transaction.kind {
                OperationKind::Deposit => {
                    running += transaction.amount;
                    "(+)"
                }
                OperationKind::Withdrawal => {
                    running -= transaction.amount;
                    "(-)"
                }
            };
            writeln!(
                output,
                " {} | {:<10} | {:>12} | Balance: {:>12} | {}",
                transaction.timestamp.format(DISPLAY_TIMESTAMP_FORMAT),
                transaction.kind.as_str(),
                money(transaction.amount),
                money(running),
                marker
            )?;
        }

        if ledger.has_rejections() {
            writeln!(output)?;
            writeln!(output, " REJECTED OPERATIONS (insufficient balance):")?;
            for rejection in ledger.rejections() {
                writeln!(output, " - {}", rejection)?;
            }
            rejected_total += ledger.rejections().len();
        }

        writeln!(output)?;
        writeln!(output, "FINAL BALANCE: {}", money(ledger.balance()))?;
        grand_total += ledger.balance();
    }

    writeln!(output)?;
    writeln!(output, "{}", "=".repeat(WIDTH))?;
    writeln!(output, "FINAL SUMMARY:")?;
    writeln!(output, "  Total balance: {}", money(grand_total))?;
    writeln!(output, "  Rejected operations: {}", rejected_total)?;
    writeln!(output, "{}", "=".repeat(WIDTH))?;

    Ok(())
}

/// Write one line per account with its final balance
pub fn write_summary(ledgers: &LedgerMap, output: &mut dyn Write) -> Result<(), LedgerError> {
    render_summary(ledgers, output).map_err(LedgerError::write_failed)
}

fn render_summary(ledgers: &LedgerMap, output: &mut dyn Write) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "FINAL BALANCES PER ACCOUNT")?;
    writeln!(output, "{}", "=".repeat(WIDTH))?;

    let mut grand_total = Decimal::ZERO;
    let mut accounts_with_rejections = 0usize;

    for ledger in by_holder(ledgers) {
        let flag = if ledger.has_rejections() {
            accounts_with_rejections += 1;
            " !"
        } else {
            ""
        };
        writeln!(
            output,
            "{:<10} | Branch: {:<4} | Account: {:<6} | Bank: {:<9} | Balance: {:>12}{}",
            ledger.holder(),
            ledger.branch(),
            ledger.account(),
            ledger.bank(),
            money(ledger.balance()),
            flag
        )?;
        grand_total += ledger.balance();
    }

    writeln!(output, "{}", "=".repeat(WIDTH))?;
    writeln!(output, "TOTAL BALANCE: {}", money(grand_total))?;
    if accounts_with_rejections > 0 {
        writeln!(
            output,
            "! {} account(s) had withdrawals rejected for insufficient balance",
            accounts_with_rejections
        )?;
    }

    Ok(())
}

/// Write balances as CSV
///
/// Columns: branch, account, bank, holder, balance, accepted, rejected.
/// Rows are sorted by account key for deterministic output.
pub fn write_balances_csv(ledgers: &LedgerMap, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    let mut sorted: Vec<&AccountLedger> = ledgers.values().collect();
    sorted.sort_by_key(|ledger| ledger.key());

    if sorted.is_empty() {
        // serialize() only emits the header alongside the first row
        writer.write_record([
            "branch", "account", "bank", "holder", "balance", "accepted", "rejected",
        ])?;
    }

    for ledger in sorted {
        writer.serialize(BalanceRow::from(ledger))?;
    }

    writer.flush().map_err(LedgerError::write_failed)?;

    Ok(())
}
