//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::Side;

/// Errors raised while loading or validating the run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parameter {0} must have 'source', 'values', or 'value'")]
    MissingSource(String),

    #[error("Parameter {0} declares more than one of 'source', 'values', 'value'")]
    AmbiguousSource(String),

    #[error("Parameter {0} resolved to no candidate values")]
    EmptyCandidates(String),

    #[error("Column '{0}' is not present in the CSV header")]
    UnknownColumn(String),

    #[error("Row {row} is missing column '{column}'")]
    MissingColumn { column: String, row: usize },

    #[error("Failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Number of test cases overflows")]
    CaseCountOverflow,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that make a single endpoint call unusable
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON decode failed: {source}; response text: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Unsupported request method: {0}")]
    InvalidMethod(String),
}

/// Errors that can occur while writing the report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Unrecoverable conditions that end a comparison run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Request to {side} API {url} failed for params {params}: {source}")]
    Fetch {
        side: Side,
        url: String,
        params: String,
        #[source]
        source: FetchError,
    },

    #[error("{side} API {url} kept rate limiting params {params} after {attempts} attempts")]
    RateLimited {
        side: Side,
        url: String,
        params: String,
        attempts: u32,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}
