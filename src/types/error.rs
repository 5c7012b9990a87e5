//! Error types for the ledger engine
//!
//! Two families of errors exist and they are never mixed:
//!
//! - **Parse errors** ([`ParseError`], wrapped with a line number in
//!   [`LineError`]): local to one input line. The line is skipped, the error
//!   is recorded, and reading continues.
//! - **Fatal errors** ([`LedgerError`]): the source cannot be opened or read,
//!   or the output cannot be written. These abort the run.
//!
//! Refused withdrawals are not errors at all; they are recorded on the
//! account ledger as [`crate::types::RejectionRecord`]s.

use thiserror::Error;

/// Classification of a malformed input line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is empty or contains only whitespace
    #[error("Blank line")]
    BlankLine,

    /// Fewer comma-separated fields than the layout requires
    #[error("Insufficient fields: expected at least {expected}, found {found}")]
    FieldCount {
        /// Minimum number of fields for the detected layout
        expected: usize,
        /// Number of fields actually present
        found: usize,
    },

    /// A mandatory field is empty after trimming
    #[error("Missing value for field '{field}'")]
    MissingField {
        /// Name of the empty field
        field: &'static str,
    },

    /// Operation kind is not exactly `DEPOSIT` or `WITHDRAWAL`
    #[error("Invalid operation kind '{value}': expected DEPOSIT or WITHDRAWAL")]
    InvalidOperationKind {
        /// The rejected literal
        value: String,
    },

    /// Timestamp does not have the canonical length
    #[error("Timestamp '{value}' has length {found}, expected {expected}")]
    TimestampLength {
        /// The rejected timestamp
        value: String,
        /// Required length
        expected: usize,
        /// Actual length
        found: usize,
    },

    /// Timestamp has the right length but is not a valid date-time
    #[error("Timestamp '{value}' is not a valid yyyy-MM-ddTHH:mm:ss date-time")]
    TimestampFormat {
        /// The rejected timestamp
        value: String,
    },

    /// Amount is not a decimal number
    #[error("Invalid amount '{value}'")]
    AmountFormat {
        /// The rejected amount
        value: String,
    },

    /// Amount is zero or negative
    #[error("Amount must be positive, got '{value}'")]
    NonPositiveAmount {
        /// The rejected amount
        value: String,
    },
}

/// A parse error tied to the physical line it occurred on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {kind}")]
pub struct LineError {
    /// 1-based physical line number
    pub line: usize,
    pub kind: ParseError,
}

impl LineError {
    pub fn new(line: usize, kind: ParseError) -> Self {
        LineError { line, kind }
    }
}

/// Fatal errors that abort a run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading the source
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The async runtime could not be created or a worker failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the runtime failure
        message: String,
    },

    /// The statement could not be written
    #[error("Output error: {message}")]
    OutputError {
        /// Description of the write failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::OutputError {
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Map an error raised while opening the source file
    ///
    /// A missing file becomes [`LedgerError::FileNotFound`]; anything else is
    /// an [`LedgerError::IoError`] that names the path.
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            LedgerError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }

    /// Create an OutputError
    pub fn output(message: impl Into<String>) -> Self {
        LedgerError::OutputError {
            message: message.into(),
        }
    }

    /// Map a failure to write the statement
    ///
    /// Write failures are output errors, never confused with failures to
    /// read the source.
    pub fn write_failed(error: std::io::Error) -> Self {
        LedgerError::OutputError {
            message: format!("Failed to write output: {}", error),
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        LedgerError::Runtime {
            message: message.into(),
        }
    }
}
