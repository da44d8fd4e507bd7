//! Resolution of one parameter declaration into its candidate list.

use indexmap::IndexSet;
use log::debug;
use std::fs;
use std::path::Path;

use crate::config::{literal_to_string, ParamSpec, ResolutionKind};
use crate::utils::error::ConfigError;

/// Resolve a parameter into its ordered candidate values
///
/// * literal: one stringified value
/// * enumerated: the declared list verbatim, duplicates included
/// * file lines: trimmed non-blank lines, first occurrence wins
///
/// # Errors
/// * `ConfigError::MissingSource` / `ConfigError::AmbiguousSource`
/// * `ConfigError::Io` - the source file cannot be read
/// * `ConfigError::EmptyCandidates` - nothing to choose from
pub fn resolve_candidates(param: &ParamSpec, base_dir: &Path) -> Result<Vec<String>, ConfigError> {
    let candidates = match param.kind()? {
        ResolutionKind::Literal(value) => vec![literal_to_string(value)],
        ResolutionKind::Enumerated(values) => values.iter().map(literal_to_string).collect(),
        ResolutionKind::FileLines(source) => {
            let path = base_dir.join(source);
            let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            dedup_lines(&contents)
        }
    };

    if candidates.is_empty() {
        return Err(ConfigError::EmptyCandidates(param.name().to_string()));
    }

    debug!(
        "Parameter {} resolved to {} candidates",
        param.name(),
        candidates.len()
    );

    Ok(candidates)
}

fn dedup_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
