//! Cartesian product of per-parameter candidate lists.

use log::info;
use std::path::Path;

use super::resolver::resolve_candidates;
use super::TestCase;
use crate::config::ParamSpec;
use crate::utils::error::ConfigError;

/// Lazy iterator over every combination of candidates
///
/// The first parameter varies slowest, matching nested-loop order.
#[derive(Debug, Clone)]
pub struct PermutationCases {
    params: Vec<ParamSpec>,
    candidates: Vec<Vec<String>>,
    indices: Vec<usize>,
    total: usize,
    exhausted: bool,
}

impl PermutationCases {
    /// Resolve every parameter and size the product
    pub fn new(params: &[ParamSpec], base_dir: &Path) -> Result<Self, ConfigError> {
        let candidates = params
            .iter()
            .map(|p| resolve_candidates(p, base_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_candidates(params.to_vec(), candidates)
    }

    /// Build from already resolved candidate lists
    pub fn from_candidates(
        params: Vec<ParamSpec>,
        candidates: Vec<Vec<String>>,
    ) -> Result<Self, ConfigError> {
        if params.len() != candidates.len() {
            return Err(ConfigError::Invalid(format!(
                "{} parameters but {} candidate lists",
                params.len(),
                candidates.len()
            )));
        }

        let total = candidates
            .iter()
            .try_fold(1usize, |acc, list| acc.checked_mul(list.len()))
            .ok_or(ConfigError::CaseCountOverflow)?;

        info!("Total number of diffs to run: {}", total);

        Ok(Self {
            indices: vec![0; params.len()],
            exhausted: total == 0 || params.is_empty(),
            params,
            candidates,
            total,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Step the odometer; the last parameter turns fastest
    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.candidates[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for PermutationCases {
    type Item = TestCase;

    fn next(&mut self) -> Option<TestCase> {
        if self.exhausted {
            return None;
        }

        let values = self
            .indices
            .iter()
            .zip(&self.candidates)
            .map(|(&i, list)| list[i].clone());
        let case = TestCase::new(&self.params, values);

        self.advance();
        Some(case)
    }
}
