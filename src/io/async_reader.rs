//! Asynchronous line reader with batch interface
//!
//! Provides batched reading of parsed lines from any tokio `AsyncBufRead`.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - tokio's `AsyncBufReadExt::split` for streaming access to raw lines,
//!   decoded one at a time so that invalid UTF-8 never ends the run
//! - the line_parser module for layout detection and per-line parsing
//! - batch reading so that callers can bound how much they hold at once
//!
//! # Architecture
//!
//! ```text
//! tokio file → AsyncReader → Batches of LineResults
//!                   ↓
//!             line_parser module
//!             (InputLayout, parse_line)
//! ```

use crate::cli::AmountColumn;
use crate::io::line_parser::{decode_line, parse_line, InputLayout};
use crate::io::sync_reader::LineResult;
use crate::types::LedgerError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Split};

/// Asynchronous operations-file reader
pub struct AsyncReader<R> {
    lines: Split<R>,
    layout: InputLayout,
    pending: Option<String>,
    line_num: usize,
}

impl<R: AsyncBufRead + Unpin> AsyncReader<R> {
    /// Create a new AsyncReader, reading the first line to detect the layout
    ///
    /// # Arguments
    ///
    /// * `reader` - Buffered async reader over the operations file
    /// * `policy` - How to decide whether an amount column is present
    ///
    /// # Returns
    ///
    /// * `Ok(AsyncReader)` once the first line has been read (or EOF reached)
    /// * `Err(LedgerError)` if the first line could not be read
    pub async fn new(reader: R, policy: AmountColumn) -> Result<Self, LedgerError> {
        let mut lines = reader.split(b'\n');
        let first = lines
            .next_segment()
            .await?
            .map(|raw| decode_line(&raw, 1));

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
        })
    }

    /// The layout detected for this input
    pub fn layout(&self) -> InputLayout {
        self.layout
    }

    /// Read a batch of parsed lines
    ///
    /// Reads up to `batch_size` lines. Malformed lines are returned as
    /// `Err(LineError)` entries inside the batch, in file order.
    ///
    /// # Returns
    ///
    /// * `Ok(batch)` - an empty batch means the end of input was reached
    /// * `Err(LedgerError)` - the underlying reader failed
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<LineResult>, LedgerError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            let line = match self.pending.take() {
                Some(line) => line,
                None => match self.lines.next_segment().await? {
                    Some(raw) => decode_line(&raw, self.line_num + 1),
                    None => break,
                },
            };

            self.line_num += 1;
            batch.push(parse_line(&line, self.line_num, self.layout.has_amount));
        }

        Ok(batch)
    }
}
