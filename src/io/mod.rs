//! I/O module
//!
//! Handles reading the operations file and writing statements.
//!
//! # Components
//!
//! - `line_parser` - Record parsing and input layout detection (pure, no I/O)
//! - `sync_reader` - Synchronous line reader with iterator interface
//! - `async_reader` - Asynchronous line reader with batch reading interface
//! - `statement` - Extract, summary and CSV rendering of computed ledgers

pub mod async_reader;
pub mod line_parser;
pub mod statement;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use line_parser::{decode_line, parse_line, InputLayout};
pub use statement::{write_balances_csv, write_statement};
pub use sync_reader::{LineResult, SyncReader};
