//! Run configuration: schema, loading and validation.
//!
//! The configuration is a YAML (or TOML) document describing the two
//! endpoints, the shared fetch budget and the parameter matrix.
//!
//! # Example
//! ```ignore
//! use api_diff::config::load_config;
//!
//! let config = load_config("config/api_diff_config.yaml")?;
//! println!("{} parameters", config.param_mapping.len());
//! ```

mod loader;
mod schema;

pub use loader::{load_config, parse_config, validate_config, ConfigFormat};
pub use schema::{
    literal_to_string, ApiDiffConfig, EndpointSpec, ParamSpec, RateLimitScope, ResolutionKind,
};
