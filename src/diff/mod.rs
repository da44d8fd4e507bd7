//! Structural comparison of old and new endpoint payloads.
//!
//! Arrays compare as sets of canonical elements, so neither element order
//! nor repetition alone counts as a difference. The adapter layer turns a [`StructuralDiff`] into the
//! `has_diff` / `has_data` / description triple stored per test case.
//!
//! # Example
//! ```ignore
//! use api_diff::diff::compare_payloads;
//! use serde_json::json;
//!
//! let cmp = compare_payloads(&json!({"x": [1, 2]}), &json!({"x": [2, 1]}));
//! assert!(!cmp.has_diff);
//! ```

mod adapter;
mod engine;
mod normalizer;
mod schema;

pub use adapter::{compare_payloads, is_empty_json, Comparison};
pub use engine::structural_diff;
pub use normalizer::{canonical_key, canonicalize, numbers_equal};
pub use schema::{ChangeDetail, ChangeKind, StructuralDiff};
