//! API Diff CLI
//!
//! Compares responses of an old and a new API endpoint over every
//! configured parameter combination and writes a diff report.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use env_logger::Env;
use std::path::PathBuf;

use api_diff::commands::{execute_run, render_run_summary, RunArgs};
use api_diff::utils::config::DEFAULT_OUTPUT;

/// Compare API responses between two endpoint versions
#[derive(Parser, Debug)]
#[command(name = "api-diff")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the YAML config file (e.g., config/api_diff_config.yaml)
    #[arg(long)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Path to the output report (.xlsx, .csv or .json)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = parse_or_help();

    // Setup logging
    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = RunArgs {
        config: cli.config,
        output: cli.output,
    };

    let stats = execute_run(&args)?;
    println!("{}", render_run_summary(&stats));

    Ok(())
}

/// Print the full help and exit 2 on any usage error
fn parse_or_help() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(_) => {
            let _ = Cli::command().print_help();
            std::process::exit(2);
        }
    }
}
