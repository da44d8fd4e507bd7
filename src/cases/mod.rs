//! Test case generation.
//!
//! A run compares the two endpoints once per [`TestCase`]. Cases come either
//! from the Cartesian product of every parameter's candidate list
//! (permutation mode) or from the rows of an external table (tabular mode).
//! Both sources are deterministic: the same configuration and inputs always
//! yield the same ordered sequence.

mod permutation;
mod resolver;
mod tabular;

pub use permutation::PermutationCases;
pub use resolver::resolve_candidates;
pub use tabular::{sniff_delimiter, TabularCases};

use indexmap::IndexMap;
use log::info;

use crate::config::{ApiDiffConfig, ParamSpec};
use crate::utils::error::ConfigError;

/// One concrete assignment of values to all declared parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Parameter name to value, in declaration order
    pub values: IndexMap<String, String>,

    /// Request parameter name to value, used to build the calls
    pub request_params: IndexMap<String, String>,
}

impl TestCase {
    /// Pair declared parameters with one value each
    pub fn new<I>(params: &[ParamSpec], values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut case_values = IndexMap::with_capacity(params.len());
        let mut request_params = IndexMap::with_capacity(params.len());

        for (param, value) in params.iter().zip(values) {
            request_params.insert(param.request_name().to_string(), value.clone());
            case_values.insert(param.name().to_string(), value);
        }

        Self {
            values: case_values,
            request_params,
        }
    }

    /// Human-readable identifier used in log lines
    pub fn key(&self) -> String {
        self.values
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// The ordered case sequence for a run, in either mode
#[derive(Debug)]
pub enum CaseSet {
    Permutation(PermutationCases),
    Tabular(TabularCases),
}

impl CaseSet {
    /// Number of cases the run will process
    pub fn total(&self) -> usize {
        match self {
            CaseSet::Permutation(cases) => cases.total(),
            CaseSet::Tabular(cases) => cases.total(),
        }
    }

    pub fn is_tabular(&self) -> bool {
        matches!(self, CaseSet::Tabular(_))
    }
}

impl Iterator for CaseSet {
    type Item = TestCase;

    fn next(&mut self) -> Option<TestCase> {
        match self {
            CaseSet::Permutation(cases) => cases.next(),
            CaseSet::Tabular(cases) => cases.next(),
        }
    }
}

/// Build the case sequence selected by the configuration
///
/// Tabular mode wins whenever `csv_file` is declared. All configuration
/// errors surface here, before any endpoint is contacted.
pub fn build_case_set(config: &ApiDiffConfig) -> Result<CaseSet, ConfigError> {
    let set = match config.tabular_input() {
        Some(path) => {
            info!("Reading test cases from {}", path.display());
            CaseSet::Tabular(TabularCases::load(&path, &config.param_mapping)?)
        }
        None => CaseSet::Permutation(PermutationCases::new(
            &config.param_mapping,
            &config.base_dir,
        )?),
    };

    Ok(set)
}
