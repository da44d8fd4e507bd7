//! Test cases read from an external table, one case per row.

use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::TestCase;
use crate::config::ParamSpec;
use crate::utils::config::{ALLOWED_DELIMITERS, SNIFF_SAMPLE_BYTES};
use crate::utils::error::ConfigError;

/// Rows of the tabular input, validated and materialized up front
#[derive(Debug)]
pub struct TabularCases {
    cases: std::vec::IntoIter<TestCase>,
    total: usize,
}

impl TabularCases {
    /// Read and validate every row of the table at `path`
    ///
    /// # Errors
    /// * `ConfigError::UnknownColumn` - a declared column is missing from the header
    /// * `ConfigError::MissingColumn` - a row is too short for a declared column
    /// * `ConfigError::Io` / `ConfigError::Csv` - the table cannot be read
    pub fn load(path: &Path, params: &[ParamSpec]) -> Result<Self, ConfigError> {
        let delimiter = sniff_delimiter(&read_sample(path)?);
        debug!("Detected delimiter {:?} for {}", delimiter as char, path.display());

        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)?;

        let cases = read_cases(reader, params)?;
        info!("Total test cases: {}", cases.len());

        Ok(Self::from_cases(cases))
    }

    pub fn from_cases(cases: Vec<TestCase>) -> Self {
        Self {
            total: cases.len(),
            cases: cases.into_iter(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for TabularCases {
    type Item = TestCase;

    fn next(&mut self) -> Option<TestCase> {
        self.cases.next()
    }
}

fn read_sample(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut sample = Vec::with_capacity(SNIFF_SAMPLE_BYTES);
    file.take(SNIFF_SAMPLE_BYTES as u64)
        .read_to_end(&mut sample)
        .map_err(io_err)?;

    Ok(sample)
}

fn read_cases<R: Read>(
    mut reader: csv::Reader<R>,
    params: &[ParamSpec],
) -> Result<Vec<TestCase>, ConfigError> {
    let headers = reader.headers()?.clone();

    let columns = params
        .iter()
        .map(|p| {
            headers
                .iter()
                .position(|h| h == p.name())
                .ok_or_else(|| ConfigError::UnknownColumn(p.name().to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut cases = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;

        let values = params
            .iter()
            .zip(&columns)
            .map(|(param, &col)| {
                record
                    .get(col)
                    .map(str::to_string)
                    .ok_or_else(|| ConfigError::MissingColumn {
                        column: param.name().to_string(),
                        row: row_idx + 1,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        cases.push(TestCase::new(params, values));
    }

    Ok(cases)
}

/// Pick the column separator from the head of a table
///
/// A candidate must appear the same, non-zero number of times on every
/// complete line of the sample. The most frequent consistent candidate
/// wins, ties going to the earlier entry of `, \t ;`. Falls back to `,`.
pub fn sniff_delimiter(sample: &[u8]) -> u8 {
    let text = String::from_utf8_lossy(sample);

    let mut lines: Vec<&str> = text.split('\n').collect();
    // A full sample most likely cut its last line short
    if sample.len() >= SNIFF_SAMPLE_BYTES && !text.ends_with('\n') && lines.len() > 1 {
        lines.pop();
    }
    let lines: Vec<&str> = lines
        .into_iter()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .collect();

    let mut best: Option<(u8, usize)> = None;
    for &delimiter in ALLOWED_DELIMITERS {
        let mut counts = lines.iter().map(|line| count_unquoted(line, delimiter));
        let first = match counts.next() {
            Some(n) if n > 0 => n,
            _ => continue,
        };
        if counts.all(|n| n == first) && best.map_or(true, |(_, n)| first > n) {
            best = Some((delimiter, first));
        }
    }

    best.map_or(b',', |(delimiter, _)| delimiter)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
