//! Schema definitions for the run configuration.
//!
//! Two generations of parameter declarations are accepted: the current
//! `param_mapping` list (`csv_column` / `request_param`) and the legacy
//! `param_config` list (`name` / `api_name`). Both deserialize into the same
//! [`ParamSpec`].

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::config::{
    DEFAULT_RATE_LIMIT_BACKOFF_SECS, DEFAULT_RATE_LIMIT_RETRIES, DEFAULT_REQUEST_TIMEOUT,
};
use crate::utils::error::ConfigError;

/// Complete run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDiffConfig {
    /// Calls allowed per window
    pub rate_limit_calls: u32,

    /// Window length in seconds
    pub rate_limit_period: f64,

    /// Whether old and new share one window
    #[serde(default)]
    pub rate_limit_scope: RateLimitScope,

    /// Retries after a 429 before the run is aborted
    #[serde(default = "default_rate_limit_retries")]
    pub rate_limit_retries: u32,

    /// Base backoff in seconds, doubled on each retry
    #[serde(default = "default_rate_limit_backoff")]
    pub rate_limit_backoff: f64,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: f64,

    /// Parameter declarations, in generation order
    #[serde(alias = "param_config")]
    pub param_mapping: Vec<ParamSpec>,

    pub old_api: EndpointSpec,
    pub new_api: EndpointSpec,

    /// Tabular input; selects tabular mode when present
    #[serde(default)]
    pub csv_file: Option<PathBuf>,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl ApiDiffConfig {
    /// Resolve a path declared in the configuration
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Location of the tabular input, if tabular mode is selected
    pub fn tabular_input(&self) -> Option<PathBuf> {
        self.csv_file.as_ref().map(|p| self.resolve_path(p))
    }

    // The accessors below saturate on values `validate_config` rejects

    pub fn rate_limit_window(&self) -> Duration {
        saturating_secs(self.rate_limit_period)
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        saturating_secs(self.rate_limit_backoff)
    }

    pub fn request_timeout(&self) -> Duration {
        saturating_secs(self.request_timeout)
    }
}

/// Convert a configured number of seconds, naming `key` on failure
///
/// # Errors
/// * `ConfigError::Invalid` - negative, not finite, or too large for a `Duration`
pub fn seconds(key: &str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        ConfigError::Invalid(format!(
            "{} must be a non-negative number of seconds that fits a duration, got {}",
            key, value
        ))
    })
}

fn saturating_secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
}

fn default_rate_limit_retries() -> u32 {
    DEFAULT_RATE_LIMIT_RETRIES
}

fn default_rate_limit_backoff() -> f64 {
    DEFAULT_RATE_LIMIT_BACKOFF_SECS
}

fn default_request_timeout() -> f64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs_f64()
}

/// How the fetch budget is split between the two endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitScope {
    /// One window counts both old and new calls
    #[default]
    Shared,
    /// Old and new each get a window of the configured size
    PerEndpoint,
}

/// One declared parameter
#[derive(Debug, Clone, Deserialize)]
pub struct ParamSpec {
    /// Parameter name; also the report column and tabular input column
    #[serde(alias = "name")]
    pub csv_column: String,

    /// Name sent to the endpoints (defaults to `csv_column`)
    #[serde(default, alias = "api_name")]
    pub request_param: Option<String>,

    /// File with one candidate per line
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Explicit candidate list
    #[serde(default)]
    pub values: Option<Vec<Value>>,

    /// Single literal candidate
    #[serde(default)]
    pub value: Option<Value>,
}

/// Where a parameter's candidates come from
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionKind<'a> {
    Literal(&'a Value),
    Enumerated(&'a [Value]),
    FileLines(&'a Path),
}

impl ParamSpec {
    pub fn name(&self) -> &str {
        &self.csv_column
    }

    pub fn request_name(&self) -> &str {
        self.request_param.as_deref().unwrap_or(&self.csv_column)
    }

    /// The single declared resolution kind
    ///
    /// # Errors
    /// * `ConfigError::MissingSource` - none of `source`/`values`/`value`
    /// * `ConfigError::AmbiguousSource` - more than one of them
    pub fn kind(&self) -> Result<ResolutionKind<'_>, ConfigError> {
        let declared = [
            self.source.is_some(),
            self.values.is_some(),
            self.value.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        if declared > 1 {
            return Err(ConfigError::AmbiguousSource(self.csv_column.clone()));
        }

        if let Some(path) = &self.source {
            Ok(ResolutionKind::FileLines(path))
        } else if let Some(values) = &self.values {
            Ok(ResolutionKind::Enumerated(values))
        } else if let Some(value) = &self.value {
            Ok(ResolutionKind::Literal(value))
        } else {
            Err(ConfigError::MissingSource(self.csv_column.clone()))
        }
    }
}

/// Endpoint description for one side of the comparison
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSpec {
    pub url: String,

    #[serde(default)]
    pub headers: IndexMap<String, String>,

    #[serde(default = "default_request_method")]
    pub request_method: String,
}

impl EndpointSpec {
    pub fn is_get(&self) -> bool {
        self.request_method.eq_ignore_ascii_case("GET")
    }
}

fn default_request_method() -> String {
    "GET".to_string()
}

/// Render a configured literal the way it is sent on the wire
pub fn literal_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(source: Option<&str>, values: Option<Vec<Value>>, value: Option<Value>) -> ParamSpec {
        ParamSpec {
            csv_column: "model_id".to_string(),
            request_param: None,
            source: source.map(PathBuf::from),
            values,
            value,
        }
    }

    #[test]
    fn test_kind_requires_one_source() {
        let err = spec(None, None, None).kind().unwrap_err();
        assert!(matches!(err, ConfigError::MissingSource(name) if name == "model_id"));
    }

    #[test]
    fn test_kind_rejects_two_sources() {
        let err = spec(Some("ids.txt"), None, Some(json!("x"))).kind().unwrap_err();
        assert!(matches!(err, ConfigError::AmbiguousSource(_)));
    }

    #[test]
    fn test_request_name_defaults_to_column() {
        let mut p = spec(None, None, Some(json!(1)));
        assert_eq!(p.request_name(), "model_id");
        p.request_param = Some("modelId".to_string());
        assert_eq!(p.request_name(), "modelId");
    }

    #[test]
    fn test_seconds_rejects_out_of_range() {
        assert_eq!(seconds("period", 1.5).unwrap(), Duration::from_millis(1500));
        assert!(seconds("period", 1e20).is_err());
        assert!(seconds("period", -1.0).is_err());
        assert!(seconds("period", f64::NAN).is_err());
    }

    #[test]
    fn test_literal_to_string() {
        assert_eq!(literal_to_string(&json!("v1")), "v1");
        assert_eq!(literal_to_string(&json!(3)), "3");
        assert_eq!(literal_to_string(&json!(true)), "true");
        assert_eq!(literal_to_string(&json!(null)), "");
    }
}
