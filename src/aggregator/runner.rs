//! The per-case run loop.
//!
//! For every case, in order: fetch old, fetch new, compare, record. A fatal
//! fetch outcome stops the loop and comes back as a [`RunError`]; nothing is
//! flushed after an abort, so the report on disk is whatever the last
//! checkpoint wrote.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::Value;
use std::thread;
use std::time::{Duration, Instant};

use super::checkpoint::Checkpointer;
use super::ledger::DiffRecord;
use crate::cases::TestCase;
use crate::config::{ApiDiffConfig, EndpointSpec};
use crate::diff::compare_payloads;
use crate::fetch::{Fetch, FetchOutcome, Side};
use crate::output::ReportSink;
use crate::utils::config::CHECKPOINT_EVERY;
use crate::utils::error::RunError;

/// How a 429 response is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries before the run is aborted; zero aborts on the first 429
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each further retry
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ApiDiffConfig) -> Self {
        Self {
            max_retries: config.rate_limit_retries,
            backoff: config.rate_limit_backoff(),
        }
    }

    /// Never retry
    pub fn fail_fast() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Totals for a completed run
#[derive(Debug, Clone)]
pub struct RunStats {
    pub total_cases: usize,
    pub processed: usize,
    pub diffs: usize,
    pub with_data: usize,
    pub checkpoints: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// Drives the comparison of every case against both endpoints
pub struct Runner<'a, F, S> {
    old_api: &'a EndpointSpec,
    new_api: &'a EndpointSpec,
    fetcher: F,
    checkpointer: Checkpointer<S>,
    retry: RetryPolicy,
}

impl<'a, F: Fetch, S: ReportSink> Runner<'a, F, S> {
    pub fn new(old_api: &'a EndpointSpec, new_api: &'a EndpointSpec, fetcher: F, sink: S) -> Self {
        Self {
            old_api,
            new_api,
            fetcher,
            checkpointer: Checkpointer::new(sink, CHECKPOINT_EVERY),
            retry: RetryPolicy::fail_fast(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Checkpoint after every `every` diffs instead of the default
    pub fn with_checkpoint_every(mut self, every: usize) -> Self {
        self.checkpointer.set_every(every);
        self
    }

    /// Process `cases` in order and write the final report
    ///
    /// # Errors
    /// * `RunError::Fetch` - an endpoint call failed fatally
    /// * `RunError::RateLimited` - 429 persisted past the retry policy
    /// * `RunError::Report` - a checkpoint or the final report could not be written
    pub fn run<I>(&mut self, cases: I, total: usize) -> Result<RunStats, RunError>
    where
        I: IntoIterator<Item = TestCase>,
    {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut with_data = 0;

        for case in cases {
            let record = self.process_case(&case)?;

            if record.has_diff {
                info!("{}: {}", case.key(), record.diff);
            } else {
                info!("{}: No diff, has_data={}", case.key(), record.has_data);
            }
            if record.has_data {
                with_data += 1;
            }

            if self.checkpointer.push(record)? {
                info!(
                    "Saved intermediate results after {} diffs of {}",
                    self.checkpointer.diff_count(),
                    total
                );
            }
        }

        self.checkpointer.finish()?;

        Ok(RunStats {
            total_cases: total,
            processed: self.checkpointer.ledger().len(),
            diffs: self.checkpointer.diff_count(),
            with_data,
            checkpoints: self.checkpointer.checkpoints(),
            started_at,
            elapsed: start.elapsed(),
        })
    }

    fn process_case(&mut self, case: &TestCase) -> Result<DiffRecord, RunError> {
        let old = self.fetch_payload(Side::Old, case)?;
        let new = self.fetch_payload(Side::New, case)?;

        debug!("Old: {}", old);
        debug!("New: {}", new);

        Ok(DiffRecord::new(case, compare_payloads(&old, &new)))
    }

    fn fetch_payload(&mut self, side: Side, case: &TestCase) -> Result<Value, RunError> {
        let endpoint = match side {
            Side::Old => self.old_api,
            Side::New => self.new_api,
        };

        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(side, endpoint, &case.request_params) {
                FetchOutcome::Success(payload) => return Ok(payload),
                FetchOutcome::Fatal(source) => {
                    return Err(RunError::Fetch {
                        side,
                        url: endpoint.url.clone(),
                        params: format!("{:?}", case.request_params),
                        source,
                    });
                }
                FetchOutcome::RateLimited if attempt < self.retry.max_retries => {
                    let delay = self.retry.delay(attempt);
                    attempt += 1;
                    warn!(
                        "Rate limited by {} API, retry {}/{} in {:.1}s",
                        side,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    thread::sleep(delay);
                }
                FetchOutcome::RateLimited => {
                    return Err(RunError::RateLimited {
                        side,
                        url: endpoint.url.clone(),
                        params: format!("{:?}", case.request_params),
                        attempts: attempt + 1,
                    });
                }
            }
        }
    }

    pub fn checkpointer(&self) -> &Checkpointer<S> {
        &self.checkpointer
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn sink(&self) -> &S {
        self.checkpointer.sink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.delay(0), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(400));
    }

    #[test]
    fn test_fail_fast_never_retries() {
        assert_eq!(RetryPolicy::fail_fast().max_retries, 0);
    }
}
