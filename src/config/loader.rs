//! Loading and validation of the run configuration file.

use log::{debug, info};
use reqwest::Method;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::schema::{seconds, ApiDiffConfig, EndpointSpec, ParamSpec};
use crate::aggregator::RESULT_FIELDS;
use crate::output::header_title;
use crate::utils::error::ConfigError;

/// Serialization format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` selects TOML; everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Load, parse and validate a configuration file
///
/// Relative paths inside the document resolve against the directory that
/// holds the file.
///
/// # Errors
/// * `ConfigError::Io` - file cannot be read
/// * `ConfigError::Yaml` / `ConfigError::Toml` - document does not parse
/// * any validation error from [`validate_config`]
pub fn load_config(path: impl AsRef<Path>) -> Result<ApiDiffConfig, ConfigError> {
    let path = path.as_ref();

    info!("Loading configuration from: {}", path.display());

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = parse_config(&contents, ConfigFormat::from_path(path))?;
    config.base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    validate_config(&config)?;

    debug!(
        "Configuration loaded: {} parameters, {} calls per {}s",
        config.param_mapping.len(),
        config.rate_limit_calls,
        config.rate_limit_period
    );

    Ok(config)
}

/// Parse a configuration document without touching the filesystem
pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<ApiDiffConfig, ConfigError> {
    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
        ConfigFormat::Toml => toml::from_str(contents)?,
    };
    Ok(config)
}

/// Check values serde cannot check on its own
pub fn validate_config(config: &ApiDiffConfig) -> Result<(), ConfigError> {
    if config.rate_limit_calls == 0 {
        return Err(ConfigError::Invalid(
            "rate_limit_calls must be greater than 0".to_string(),
        ));
    }

    if seconds("rate_limit_period", config.rate_limit_period)?.is_zero() {
        return Err(ConfigError::Invalid(
            "rate_limit_period must be a positive number of seconds".to_string(),
        ));
    }

    seconds("rate_limit_backoff", config.rate_limit_backoff)?;

    if seconds("request_timeout", config.request_timeout)?.is_zero() {
        return Err(ConfigError::Invalid(
            "request_timeout must be a positive number of seconds".to_string(),
        ));
    }

    if config.param_mapping.is_empty() {
        return Err(ConfigError::Invalid(
            "at least one parameter must be declared".to_string(),
        ));
    }

    validate_column_names(&config.param_mapping)?;

    // Tabular mode reads values from the table; otherwise every parameter
    // needs exactly one candidate source
    if config.csv_file.is_none() {
        for param in &config.param_mapping {
            param.kind()?;
        }
    }

    validate_endpoint("old_api", &config.old_api)?;
    validate_endpoint("new_api", &config.new_api)?;

    Ok(())
}

/// Parameter names become report columns next to the result fields, and
/// spreadsheet table headers must be unique ignoring case
fn validate_column_names(params: &[ParamSpec]) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = RESULT_FIELDS
        .iter()
        .map(|field| (header_title(field).to_lowercase(), *field))
        .collect();

    for param in params {
        let header = header_title(param.name()).to_lowercase();
        if let Some(existing) = seen.insert(header, param.name()) {
            return Err(ConfigError::Invalid(format!(
                "parameter '{}' clashes with report column '{}'",
                param.name(),
                existing
            )));
        }
    }

    Ok(())
}

fn validate_endpoint(key: &str, endpoint: &EndpointSpec) -> Result<(), ConfigError> {
    if !endpoint.url.starts_with("http://") && !endpoint.url.starts_with("https://") {
        return Err(ConfigError::Invalid(format!(
            "{}.url must start with http:// or https://",
            key
        )));
    }

    Method::from_bytes(endpoint.request_method.to_ascii_uppercase().as_bytes()).map_err(|_| {
        ConfigError::Invalid(format!(
            "{}.request_method '{}' is not a valid HTTP method",
            key, endpoint.request_method
        ))
    })?;

    Ok(())
}
