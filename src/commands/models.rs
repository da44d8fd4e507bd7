use std::path::PathBuf;

use crate::utils::config::{DEFAULT_OUTPUT, DEFAULT_TEST_DATA_OUTPUT};

/// Arguments for a comparison run
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// Path to the YAML/TOML configuration
    pub config: PathBuf,

    /// Report path; extension selects the format
    pub output: PathBuf,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config/api_diff_config.yaml"),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Arguments for writing the permutation cases of a configuration as CSV
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub config: PathBuf,
    pub output: PathBuf,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config/api_diff_config.yaml"),
            output: PathBuf::from(DEFAULT_TEST_DATA_OUTPUT),
        }
    }
}
