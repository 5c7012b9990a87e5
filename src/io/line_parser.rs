//! Record parsing for the comma-separated operations file
//!
//! This module turns one raw input line into a validated [`Transaction`] or a
//! classified [`LineError`]. It also decides, from the first line of a file,
//! whether that line is a header and whether the file carries an amount
//! column.
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Validation order
//!
//! Checks short-circuit on the first failure:
//!
//! 1. blank line
//! 2. field count (6, or 7 with an amount column)
//! 3. mandatory fields non-empty after trimming
//! 4. operation kind is exactly `DEPOSIT` or `WITHDRAWAL`
//! 5. timestamp is 19 characters, then parses as `yyyy-MM-ddTHH:mm:ss`
//! 6. amount parses and is strictly positive (or defaults to one)

use crate::cli::AmountColumn;
use crate::types::{LineError, OperationKind, ParseError, Transaction};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;
use tracing::warn;

/// Input timestamp pattern (`yyyy-MM-ddTHH:mm:ss`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Exact character length of a canonical input timestamp
pub const TIMESTAMP_LEN: usize = 19;

/// Character classes of a canonical timestamp; `9` stands for any digit
const TIMESTAMP_SHAPE: &str = "9999-99-99T99:99:99";

/// Field count of a line without an amount column
pub const BASE_FIELD_COUNT: usize = 6;

const AMOUNT_HEADERS: [&str; 2] = ["AMOUNT", "VALOR"];

/// How lines of one file are to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLayout {
    /// The first line is a header and must be skipped
    pub has_header: bool,

    /// Lines carry a seventh, amount column
    pub has_amount: bool,
}

impl InputLayout {
    /// Inspect the first line of a file
    ///
    /// The line is a header iff it is not blank and none of its fields is an
    /// operation kind literal. With [`AmountColumn::Auto`], a header decides
    /// the amount column by name (`AMOUNT` or `VALOR`); without a header the
    /// field count of the first line decides.
    pub fn detect(first_line: &str, policy: AmountColumn) -> Self {
        let fields: Vec<&str> = first_line.split(',').map(str::trim).collect();
        let has_header = !first_line.trim().is_empty()
            && !fields
                .iter()
                .any(|field| OperationKind::from_literal(field).is_some());

        let has_amount = match policy {
            AmountColumn::Present => true,
            AmountColumn::Absent => false,
            AmountColumn::Auto if has_header => fields.iter().any(|field| {
                AMOUNT_HEADERS
                    .iter()
                    .any(|name| field.eq_ignore_ascii_case(name))
            }),
            AmountColumn::Auto => fields.len() > BASE_FIELD_COUNT,
        };

        InputLayout {
            has_header,
            has_amount,
        }
    }

    /// Minimum number of comma-separated fields a data line must have
    pub fn required_fields(&self) -> usize {
        required_field_count(self.has_amount)
    }
}

fn required_field_count(has_amount: bool) -> usize {
    if has_amount {
        BASE_FIELD_COUNT + 1
    } else {
        BASE_FIELD_COUNT
    }
}

/// Decode one raw line, given without its `\n` terminator
///
/// A trailing `\r` is dropped. Bytes that are not valid UTF-8 (for instance
/// a Latin-1 encoded holder name) are replaced with U+FFFD so the line can
/// still be validated on its own.
pub fn decode_line(raw: &[u8], line_number: usize) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            warn!(line = line_number, "invalid UTF-8 replaced");
            text
        }
    }
}

/// Parse one raw line into a transaction
///
/// # Arguments
///
/// * `line` - The raw line, without its terminator
/// * `line_number` - 1-based physical line number, used in errors
/// * `has_amount` - Whether the file carries an amount column
///
/// # Returns
///
/// * `Ok(Transaction)` with every text field trimmed
/// * `Err(LineError)` classifying the first failed check
pub fn parse_line(line: &str, line_number: usize, has_amount: bool) -> Result<Transaction, LineError> {
    parse_fields(line, has_amount).map_err(|kind| LineError::new(line_number, kind))
}

fn parse_fields(line: &str, has_amount: bool) -> Result<Transaction, ParseError> {
    if line.trim().is_empty() {
        return Err(ParseError::BlankLine);
    }

    let fields: Vec<&str> = line.split(',').collect();
    let expected = required_field_count(has_amount);
    if fields.len() < expected {
        return Err(ParseError::FieldCount {
            expected,
            found: fields.len(),
        });
    }

    let branch = required(fields[0], "branch")?;
    let account = required(fields[1], "account")?;
    let bank = required(fields[2], "bank")?;
    let holder = required(fields[3], "holder")?;
    let kind_literal = required(fields[4], "operation")?;
    let timestamp_literal = required(fields[5], "timestamp")?;
    let amount_literal = if has_amount {
        Some(required(fields[6], "amount")?)
    } else {
        None
    };

    let kind = OperationKind::from_literal(kind_literal).ok_or_else(|| {
        ParseError::InvalidOperationKind {
            value: kind_literal.to_string(),
        }
    })?;

    let timestamp = parse_timestamp(timestamp_literal)?;

    let amount = match amount_literal {
        Some(literal) => parse_amount(literal)?,
        None => Decimal::ONE,
    };

    Ok(Transaction {
        branch: branch.to_string(),
        account: account.to_string(),
        bank: bank.to_string(),
        holder: holder.to_string(),
        kind,
        timestamp,
        amount,
    })
}

fn required<'a>(raw: &'a str, field: &'static str) -> Result<&'a str, ParseError> {
    let value = raw.trim();
    if value.is_empty() {
        Err(ParseError::MissingField { field })
    } else {
        Ok(value)
    }
}

/// Parse a canonical `yyyy-MM-ddTHH:mm:ss` timestamp
pub fn parse_timestamp(literal: &str) -> Result<NaiveDateTime, ParseError> {
    let found = literal.chars().count();
    if found != TIMESTAMP_LEN {
        return Err(ParseError::TimestampLength {
            value: literal.to_string(),
            expected: TIMESTAMP_LEN,
            found,
        });
    }

    let invalid = || ParseError::TimestampFormat {
        value: literal.to_string(),
    };

    // chrono tolerates padding spaces and a sign before numeric fields
    if !has_timestamp_shape(literal) {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(literal, TIMESTAMP_FORMAT).map_err(|_| invalid())
}

/// Every digit position holds an ASCII digit and every separator is exact
fn has_timestamp_shape(literal: &str) -> bool {
    literal.len() == TIMESTAMP_SHAPE.len()
        && literal
            .bytes()
            .zip(TIMESTAMP_SHAPE.bytes())
            .all(|(byte, expected)| match expected {
                b'9' => byte.is_ascii_digit(),
                separator => byte == separator,
            })
}

/// Parse a strictly positive decimal amount
///
/// Plain decimal notation and exponent notation (`1E2`, `2.5e-1`) are both
/// accepted.
pub fn parse_amount(literal: &str) -> Result<Decimal, ParseError> {
    let amount = Decimal::from_str(literal)
        .or_else(|_| Decimal::from_scientific(literal))
        .map_err(|_| ParseError::AmountFormat {
            value: literal.to_string(),
        })?;

    if amount <= Decimal::ZERO {
        return Err(ParseError::NonPositiveAmount {
            value: literal.to_string(),
        });
    }

    Ok(amount)
}
