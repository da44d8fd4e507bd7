//! Test data generation.
//!
//! Writes every permutation case of a configuration as a CSV table whose
//! header is the parameter names, ready to be used as `csv_file` input.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use super::models::GenerateArgs;
use crate::cases::PermutationCases;
use crate::config::load_config;
use crate::output::ensure_parent_dir;

/// Generate the CSV; returns the number of rows written
pub fn execute_generate(args: &GenerateArgs) -> Result<usize> {
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    let cases = PermutationCases::new(&config.param_mapping, &config.base_dir)
        .context("Failed to resolve parameters")?;
    info!("Total combinations to generate: {}", cases.total());

    let rows = write_cases(cases, &args.output)?;

    info!("CSV generated: {}", args.output.display());
    Ok(rows)
}

fn write_cases(cases: PermutationCases, output: &Path) -> Result<usize> {
    ensure_parent_dir(output)?;

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    writer.write_record(cases.params().iter().map(|p| p.name()))?;

    let mut rows = 0;
    for case in cases {
        writer.write_record(case.values.values())?;
        rows += 1;
    }
    writer.flush()?;

    Ok(rows)
}
