//! Rate-limited fetching of endpoint responses.
//!
//! Every call first draws from a sliding-window budget, then issues one HTTP
//! request and classifies the response as a [`FetchOutcome`].

pub mod client;
pub mod rate_limit;

pub use client::HttpFetcher;
pub use rate_limit::{RateBudget, RateLimiter};

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

use crate::config::EndpointSpec;
use crate::utils::error::FetchError;

/// Request parameters in declaration order
pub type RequestParams = IndexMap<String, String>;

/// Which endpoint of the comparison a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => write!(f, "old"),
            Side::New => write!(f, "new"),
        }
    }
}

/// Classified result of one endpoint call
#[derive(Debug)]
pub enum FetchOutcome {
    /// Decoded JSON payload
    Success(Value),
    /// HTTP 429
    RateLimited,
    /// Anything that makes the comparison meaningless
    Fatal(FetchError),
}

/// Something that can fetch one endpoint response
///
/// The run loop is generic over this so it can be driven without a network.
pub trait Fetch {
    fn fetch(&mut self, side: Side, endpoint: &EndpointSpec, params: &RequestParams)
        -> FetchOutcome;
}
