//! Rust Ledger Engine CLI
//!
//! Command-line interface for computing account balances from an operations file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > statement.txt
//! cargo run -- --format summary operations.csv
//! cargo run -- --format csv --strategy async operations.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 operations.csv
//! cargo run -- --amount-column absent legacy_operations.csv
//! ```
//!
//! The statement goes to stdout; logs go to stderr and are filtered with
//! `RUST_LOG` (default `rust_ledger_engine=info`).
//!
//! # Processing Strategies
//!
//! - **sync**: Sequential reading and replay (default)
//! - **async**: Batched reading with one replay task per account
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use rust_ledger_engine::cli;
use rust_ledger_engine::strategy;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_ledger_engine=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::parse_args();

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout().lock();
    if let Err(e) = strategy.process(
        &args.input_file,
        args.amount_column,
        args.format,
        &mut output,
    ) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
