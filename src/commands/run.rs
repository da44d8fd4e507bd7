//! Run command implementation.
//!
//! The run command:
//! 1. Loads and validates the configuration
//! 2. Builds the test case sequence (all configuration errors surface here)
//! 3. Compares every case against both endpoints under the rate budget
//! 4. Writes checkpoints and the final report

use anyhow::{Context, Result};
use log::{error, info};

use super::models::RunArgs;
use crate::aggregator::{RetryPolicy, RunStats, Runner};
use crate::cases::build_case_set;
use crate::config::load_config;
use crate::fetch::HttpFetcher;
use crate::output::{sink_for_path, validate_path};

/// Execute a comparison run
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Configuration errors, before any request is sent
/// * The first fatal fetch outcome; the report keeps the last checkpoint
/// * Report write failures
pub fn execute_run(args: &RunArgs) -> Result<RunStats> {
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    validate_path(&args.output).context("Invalid output path")?;

    let cases = build_case_set(&config).context("Failed to build test cases")?;
    let total = cases.total();
    info!(
        "{} mode: {} test cases",
        if cases.is_tabular() { "Tabular" } else { "Permutation" },
        total
    );

    let fetcher = HttpFetcher::from_config(&config).context("Failed to create HTTP client")?;
    let sink = sink_for_path(&args.output);

    let mut runner = Runner::new(&config.old_api, &config.new_api, fetcher, sink)
        .with_retry(RetryPolicy::from_config(&config));

    match runner.run(cases, total) {
        Ok(stats) => {
            info!("Report written to {}", args.output.display());
            Ok(stats)
        }
        Err(e) => {
            let checkpointer = runner.checkpointer();
            error!(
                "Run aborted after {} of {} cases; {} checkpoint(s) on disk",
                checkpointer.ledger().len(),
                total,
                checkpointer.checkpoints()
            );
            Err(e).context("Comparison run aborted")
        }
    }
}
