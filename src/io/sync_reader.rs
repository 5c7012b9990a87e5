//! Synchronous line reader with iterator interface
//!
//! Provides a streaming iterator over parsed lines of an operations file.
//! Delegates parsing to the line_parser module.
//!
//! # Design
//!
//! The SyncReader wraps a buffered file reader. On open it reads the first
//! line to decide the [`InputLayout`]; a header is consumed there, a data line
//! is kept and yielded first. Every subsequent line is parsed independently,
//! so a malformed line never stops the iteration.
//!
//! ```no_run
//! use rust_ledger_engine::cli::AmountColumn;
//! use rust_ledger_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::open(Path::new("operations.csv"), AmountColumn::Auto).unwrap();
//! for item in reader {
//!     match item {
//!         Ok(Ok(transaction)) => println!("{:?}", transaction),
//!         Ok(Err(line_error)) => eprintln!("{}", line_error),
//!         Err(fatal) => eprintln!("{}", fatal),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Failing to open the file is returned from `open()`
//! - Per-line parse errors are yielded as `Ok(Err(LineError))`
//! - Bytes that are not valid UTF-8 are replaced, so an oddly encoded line
//!   is validated like any other instead of ending the run
//! - An I/O failure while reading is yielded as `Err(LedgerError)` and ends
//!   the iteration

use crate::cli::AmountColumn;
use crate::io::line_parser::{decode_line, parse_line, InputLayout};
use crate::types::{LedgerError, LineError, Transaction};
use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::Path;

/// Read buffer size for input files
pub const READ_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Outcome of parsing one data line
pub type LineResult = Result<Transaction, LineError>;

/// Synchronous operations-file reader
#[derive(Debug)]
pub struct SyncReader {
    lines: Split<BufReader<File>>,
    layout: InputLayout,

    /// First line, when it turned out to be data rather than a header
    pending: Option<String>,

    /// Physical number of the last line handed out
    line_num: usize,

    finished: bool,
}

impl SyncReader {
    /// Open a file and detect its layout
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the operations file
    /// * `policy` - How to decide whether an amount column is present
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened and its first line was readable
    /// * `Err(LedgerError)` if the file could not be opened or read
    pub fn open(path: &Path, policy: AmountColumn) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::open_failed(path, e))?;
        let mut lines = BufReader::with_capacity(READ_BUFFER_CAPACITY, file).split(b'\n');

        let first = lines.next().transpose()?.map(|raw| decode_line(&raw, 1));
        let layout = first
            .as_deref()
            .map(|line| InputLayout::detect(line, policy))
            .unwrap_or(InputLayout {
                has_header: false,
                has_amount: matches!(policy, AmountColumn::Present),
            });

        let (pending, line_num) = match first {
            Some(_) if layout.has_header => (None, 1),
            other => (other, 0),
        };

        Ok(Self {
            lines,
            layout,
            pending,
            line_num,
            finished: false,
        })
    }

    /// The layout detected for this file
    pub fn layout(&self) -> InputLayout {
        self.layout
    }
}

impl Iterator for SyncReader {
    type Item = Result<LineResult, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let line = match self.pending.take() {
            Some(line) => line,
            None => match self.lines.next()? {
                Ok(raw) => decode_line(&raw, self.line_num + 1),
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            },
        };

        self.line_num += 1;
        Some(Ok(parse_line(&line, self.line_num, self.layout.has_amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OperationKind, ParseError};
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary operations file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn read_all(content: &str) -> Vec<LineResult> {
        read_all_bytes(content.as_bytes())
    }

    fn read_all_bytes(content: &[u8]) -> Vec<LineResult> {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        SyncReader::open(file.path(), AmountColumn::Auto)
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn test_open_fails_on_missing_file() {
        let result = SyncReader::open(Path::new("nonexistent.csv"), AmountColumn::Auto);
        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }

    #[test]
    fn test_header_is_skipped_and_amount_detected() {
        let records = read_all(
            "branch,account,bank,holder,operation,timestamp,amount\n\
             0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,100.00\n",
        );

        assert_eq!(records.len(), 1);
        let tx = records[0].as_ref().unwrap();
        assert_eq!(tx.kind, OperationKind::Deposit);
        assert_eq!(tx.amount, Decimal::new(10000, 2));
    }

    #[test]
    fn test_headerless_file_starts_at_line_one() {
        let records = read_all(
            "0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,100.00\n\
             0001,100,ACME,Alice,BOGUS,2024-01-01T11:00:00,1.00\n",
        );

        assert_eq!(records.len(), 2);
        assert!(records[0].is_ok());
        assert_eq!(records[1].as_ref().unwrap_err().line, 2);
    }

    #[test]
    fn test_legacy_file_without_amount_uses_unit_amount() {
        let records = read_all(
            "branch,account,bank,holder,operation,timestamp\n\
             0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00\n",
        );

        assert_eq!(records[0].as_ref().unwrap().amount, Decimal::ONE);
    }

    #[test]
    fn test_line_numbers_include_header() {
        let records = read_all(
            "branch,account,bank,holder,operation,timestamp,amount\n\
             0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,100.00\n\
             0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,-5.00\n\
             0001,100,ACME,Alice,DEPOSIT,2024-01-01T12:00:00,5.00\n",
        );

        assert_eq!(records.len(), 3);
        let error = records[1].as_ref().unwrap_err();
        assert_eq!(error.line, 3);
        assert!(matches!(error.kind, ParseError::NonPositiveAmount { .. }));
        assert!(records[2].is_ok());
    }

    #[test]
    fn test_blank_line_is_reported_not_skipped() {
        let records = read_all(
            "branch,account,bank,holder,operation,timestamp,amount\n\
             \n\
             0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,1.00\n",
        );

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].as_ref().unwrap_err(),
            &LineError::new(2, ParseError::BlankLine)
        );
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let records = read_all(
            "branch,account,bank,holder,operation,timestamp,amount\r\n\
             0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,1.00\r\n",
        );

        assert_eq!(records[0].as_ref().unwrap().amount, Decimal::ONE);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_the_run() {
        let records = read_all_bytes(
            b"0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,100.00\n\
              0001,200,ACME,Jo\xe3o,DEPOSIT,2024-01-01T11:00:00,5.00\n\
              0001,100,ACME,Alice,WITHDRAWAL,2024-01-01T12:00:00,1.00\n",
        );

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].as_ref().unwrap().holder, "Jo\u{FFFD}o");
        assert_eq!(records[2].as_ref().unwrap().kind, OperationKind::Withdrawal);
    }

    #[test]
    fn test_invalid_utf8_header_is_still_a_header() {
        let records = read_all_bytes(
            b"AG\xcaNCIA,CONTA,BANCO,TITULAR,OPERACAO,DATAHORA,VALOR\n\
              0001,100,ACME,Alice,DEPOSIT,2024-01-01T10:00:00,100.00\n",
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().amount, Decimal::new(10000, 2));
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        assert!(read_all("").is_empty());
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        assert!(read_all("branch,account,bank,holder,operation,timestamp,amount\n").is_empty());
    }

    #[test]
    fn test_layout_is_exposed() {
        let file = create_temp_csv("branch,account,bank,holder,operation,timestamp\n");
        let reader = SyncReader::open(file.path(), AmountColumn::Auto).unwrap();

        assert_eq!(
            reader.layout(),
            InputLayout {
                has_header: true,
                has_amount: false
            }
        );
    }
}
