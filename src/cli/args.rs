use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compute per-account balances from a file of bank operations
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(
    about = "Compute per-account balances from a file of bank operations",
    long_about = None
)]
pub struct CliArgs {
    /// Input file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the input operations file")]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for sequential or 'async' for parallel per-account replay"
    )]
    pub strategy: StrategyType,

    /// Statement format written to stdout
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "extract",
        help = "Statement format: 'extract', 'summary' or 'csv'"
    )]
    pub format: StatementFormat,

    /// Whether the input carries an amount column
    #[arg(
        long = "amount-column",
        value_name = "MODE",
        default_value = "auto",
        help = "Amount column: 'auto' (detect from the first line), 'present' or 'absent'"
    )]
    pub amount_column: AmountColumn,

    /// Number of lines per read batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of lines per read batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Worker threads for parallel replay (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Worker threads for parallel replay (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available statement formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatementFormat {
    /// Per-account history with running balances
    Extract,
    /// One line per account
    Summary,
    /// Machine-readable balances
    Csv,
}

/// Amount column policy for the input file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AmountColumn {
    /// Decide from the header (or the first line's field count)
    #[default]
    Auto,
    /// Every line carries an amount column
    Present,
    /// No amount column; every amount is one
    Absent,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
