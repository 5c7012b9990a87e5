//! End-to-end integration tests
//!
//! These tests validate the complete ledger pipeline using predefined test
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Runs it through a processing strategy
//! 3. Writes the statement in the requested format
//! 4. Compares the output with the expected file of that fixture
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Withdrawals without funds and out-of-order input
//! - Duplicate records
//! - Malformed lines (non-positive amounts, bad kinds, bad timestamps, blank lines)
//! - Files without an amount column
//! - Lines that are not valid UTF-8 (Latin-1 holder names)
//!
//! Each test is run twice: once with the sync strategy and once with the async one.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_ledger_engine::cli::{AmountColumn, StatementFormat, StrategyType};
    use rust_ledger_engine::strategy::{create_strategy, BatchConfig};
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a fixture's input.csv and compare the output with `expected_file`
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(
        fixture_name: &str,
        expected_file: &str,
        format: StatementFormat,
        strategy_type: StrategyType,
    ) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/{}", fixture_dir, expected_file);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        // Small batches so the async reader crosses batch boundaries
        let strategy = create_strategy(strategy_type, Some(BatchConfig::new(2, 2)));

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(
                Path::new(&input_path),
                AmountColumn::Auto,
                format,
                &mut temp_output,
            )
            .unwrap_or_else(|e| panic!("Failed to process operations: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?}, format: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, format, actual_output, expected_output
        );
    }

    /// Balance CSV for every fixture with both strategies
    #[rstest]
    #[case("happy_path")]
    #[case("no_prior_deposit")]
    #[case("out_of_order")]
    #[case("duplicates")]
    #[case("non_positive_amount")]
    #[case("legacy_no_amount")]
    #[case("multiple_accounts")]
    #[case("latin1_holder")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, "expected.csv", StatementFormat::Csv, strategy);
    }

    /// Summary statements, which carry the processing report
    #[rstest]
    #[case("duplicates")]
    #[case("non_positive_amount")]
    #[case("multiple_accounts")]
    fn test_summary_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(
            fixture,
            "expected_summary.txt",
            StatementFormat::Summary,
            strategy,
        );
    }

    /// Full extract with history and rejected withdrawals
    #[rstest]
    fn test_extract_fixture(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(
            "out_of_order",
            "expected_extract.txt",
            StatementFormat::Extract,
            strategy,
        );
    }

    #[rstest]
    fn test_missing_input_is_fatal(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let strategy = create_strategy(strategy, None);
        let mut output = Vec::new();

        let result = strategy.process(
            Path::new("tests/fixtures/does_not_exist/input.csv"),
            AmountColumn::Auto,
            StatementFormat::Csv,
            &mut output,
        );

        assert!(result.is_err());
        assert!(output.is_empty());
    }
}
