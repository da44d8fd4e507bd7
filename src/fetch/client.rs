//! HTTP client for the old and new endpoints.

use log::{debug, error, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::{Fetch, FetchOutcome, RateBudget, RequestParams, Side};
use crate::config::{ApiDiffConfig, EndpointSpec};
use crate::utils::config::BODY_PREVIEW_CHARS;
use crate::utils::error::FetchError;

/// Blocking HTTP fetcher drawing every call from a [`RateBudget`]
pub struct HttpFetcher {
    client: Client,
    budget: RateBudget,
}

impl HttpFetcher {
    /// Create a fetcher with the budget and timeout declared in `config`
    pub fn from_config(config: &ApiDiffConfig) -> Result<Self, FetchError> {
        Self::new(RateBudget::from_config(config), config.request_timeout())
    }

    pub fn new(budget: RateBudget, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::RequestFailed)?;

        Ok(Self { client, budget })
    }

    fn build_request(
        &self,
        endpoint: &EndpointSpec,
        params: &RequestParams,
    ) -> Result<RequestBuilder, FetchError> {
        let mut request = if endpoint.is_get() {
            self.client.get(&endpoint.url).query(params)
        } else {
            let method_name = endpoint.request_method.to_ascii_uppercase();
            let method = Method::from_bytes(method_name.as_bytes())
                .map_err(|_| FetchError::InvalidMethod(endpoint.request_method.clone()))?;
            self.client.request(method, &endpoint.url).json(params)
        };

        for (name, value) in &endpoint.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        Ok(request)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(
        &mut self,
        side: Side,
        endpoint: &EndpointSpec,
        params: &RequestParams,
    ) -> FetchOutcome {
        let request = match self.build_request(endpoint, params) {
            Ok(request) => request,
            Err(e) => return FetchOutcome::Fatal(e),
        };

        self.budget.limiter_for(side).acquire();

        debug!("Fetching {} with params {:?}", endpoint.url, params);

        let outcome = match request.send() {
            Ok(response) => classify_response(response),
            Err(e) => FetchOutcome::Fatal(FetchError::RequestFailed(e)),
        };

        match &outcome {
            FetchOutcome::RateLimited => {
                warn!("Rate limit hit on {} API {}", side, endpoint.url);
            }
            FetchOutcome::Fatal(e) => {
                error!(
                    "Request failed for {} with params {:?}: {}",
                    endpoint.url, params, e
                );
            }
            FetchOutcome::Success(_) => {}
        }

        outcome
    }
}

/// Map a response onto success, rate limited, or fatal
fn classify_response(response: Response) -> FetchOutcome {
    let status = response.status();
    debug!(
        "Status: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );

    let body = match response.text() {
        Ok(body) => body,
        Err(e) => return FetchOutcome::Fatal(FetchError::RequestFailed(e)),
    };

    classify_body(status, &body)
}

fn classify_body(status: StatusCode, body: &str) -> FetchOutcome {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return FetchOutcome::RateLimited;
    }

    if !status.is_success() {
        return FetchOutcome::Fatal(FetchError::Status {
            status: status.as_u16(),
            body: preview(body),
        });
    }

    match serde_json::from_str::<Value>(body) {
        Ok(payload) => FetchOutcome::Success(payload),
        Err(source) => FetchOutcome::Fatal(FetchError::Decode {
            source,
            body: preview(body),
        }),
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
