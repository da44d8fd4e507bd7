//! Generate a CSV with all parameter combinations of a configuration,
//! matching the case order of a permutation-mode run.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use api_diff::commands::{execute_generate, GenerateArgs};
use api_diff::utils::config::DEFAULT_TEST_DATA_OUTPUT;

/// Generate CSV with all parameter combinations from config
#[derive(Parser, Debug)]
#[command(name = "create-test-data")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long)]
    config: PathBuf,

    /// Path to the output CSV file
    #[arg(short, long, default_value = DEFAULT_TEST_DATA_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(_) => {
            let _ = Cli::command().print_help();
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let rows = execute_generate(&GenerateArgs {
        config: cli.config,
        output: cli.output,
    })?;
    info!("Wrote {} rows", rows);

    Ok(())
}
