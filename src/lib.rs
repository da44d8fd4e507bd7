//! API Diff
//!
//! Regression comparison between two versions of an HTTP API. A declarative
//! configuration describes a matrix (or table) of request parameters; every
//! combination is sent to an "old" and a "new" endpoint, the two JSON
//! responses are compared structurally, and the results accumulate in a
//! checkpointed report.
//!
//! This crate provides the core implementation for the `api-diff` and
//! `create-test-data` CLI tools.
//!
//! ## Getting Started
//!
//! ```bash
//! api-diff --config config/api_diff_config.yaml -o output/api_diff.xlsx
//! ```

pub mod aggregator;
pub mod cases;
pub mod commands;
pub mod config;
pub mod diff;
pub mod fetch;
pub mod output;
pub mod utils;
