//! Aggregation of per-case comparisons into a checkpointed ledger.
//!
//! This module turns the case sequence into report data:
//! - One [`DiffRecord`] per test case, appended in generation order
//! - Periodic full-ledger flushes to the report sink
//! - The run loop that ties fetching, diffing and recording together

pub mod checkpoint;
pub mod ledger;
pub mod runner;

// Re-export main types and functions
pub use checkpoint::Checkpointer;
pub use ledger::{Cell, DiffRecord, ResultLedger, RESULT_FIELDS};
pub use runner::{RetryPolicy, RunStats, Runner};
