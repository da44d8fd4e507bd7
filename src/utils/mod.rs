//! Utility modules for configuration defaults and error handling.

pub mod config;
pub mod error;

// Re-export commonly used error types for convenience
pub use error::{ConfigError, FetchError, ReportError, RunError};
