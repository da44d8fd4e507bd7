//! Sliding-window call budget.

use log::debug;
use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use super::Side;
use crate::config::{ApiDiffConfig, RateLimitScope};

/// At most `max_calls` acquisitions in any window of `period`
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_calls: usize,
    period: Duration,
    calls: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_calls: u32, period: Duration) -> Self {
        let max_calls = max_calls.max(1) as usize;
        Self {
            max_calls,
            period,
            calls: VecDeque::with_capacity(max_calls),
        }
    }

    /// Block the calling thread until the window has capacity, then take a slot
    pub fn acquire(&mut self) {
        loop {
            let now = Instant::now();
            match self.wait_time(now) {
                None => {
                    self.calls.push_back(now);
                    return;
                }
                Some(wait) => {
                    debug!("Rate limit reached, sleeping {:.3}s", wait.as_secs_f64());
                    thread::sleep(wait);
                }
            }
        }
    }

    /// Time until a slot frees up, or `None` if one is available at `now`
    pub fn wait_time(&mut self, now: Instant) -> Option<Duration> {
        while let Some(&oldest) = self.calls.front() {
            if now.duration_since(oldest) >= self.period {
                self.calls.pop_front();
            } else {
                break;
            }
        }

        if self.calls.len() < self.max_calls {
            return None;
        }

        self.calls
            .front()
            .map(|&oldest| self.period.saturating_sub(now.duration_since(oldest)))
    }

    /// Calls counted in the current window
    pub fn in_window(&self) -> usize {
        self.calls.len()
    }
}

/// The budget both endpoints draw from
#[derive(Debug, Clone)]
pub enum RateBudget {
    /// One window shared by old and new calls
    Shared(RateLimiter),
    /// Independent windows of the same size
    PerEndpoint { old: RateLimiter, new: RateLimiter },
}

impl RateBudget {
    pub fn from_config(config: &ApiDiffConfig) -> Self {
        let limiter = RateLimiter::new(config.rate_limit_calls, config.rate_limit_window());
        match config.rate_limit_scope {
            RateLimitScope::Shared => RateBudget::Shared(limiter),
            RateLimitScope::PerEndpoint => RateBudget::PerEndpoint {
                old: limiter.clone(),
                new: limiter,
            },
        }
    }

    /// The window a call to `side` counts against
    pub fn limiter_for(&mut self, side: Side) -> &mut RateLimiter {
        match self {
            RateBudget::Shared(limiter) => limiter,
            RateBudget::PerEndpoint { old, new } => match side {
                Side::Old => old,
                Side::New => new,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_within_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.wait_time(start).is_none());
        limiter.calls.push_back(start);
        assert!(limiter.wait_time(start).is_none());
        limiter.calls.push_back(start);

        let wait = limiter.wait_time(start + Duration::from_secs(10)).unwrap();
        assert_eq!(wait, Duration::from_secs(50));
    }

    #[test]
    fn test_window_slides() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(5));
        let start = Instant::now();
        limiter.calls.push_back(start);

        assert!(limiter.wait_time(start + Duration::from_secs(1)).is_some());
        assert!(limiter.wait_time(start + Duration::from_secs(5)).is_none());
        assert_eq!(limiter.in_window(), 0);
    }

    #[test]
    fn test_acquire_blocks_when_full() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(150));
        let start = Instant::now();

        limiter.acquire();
        limiter.acquire();
        limiter.acquire();

        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[test]
    fn test_shared_budget_counts_both_sides() {
        let mut budget = RateBudget::Shared(RateLimiter::new(10, Duration::from_secs(60)));
        budget.limiter_for(Side::Old).acquire();
        budget.limiter_for(Side::New).acquire();
        assert_eq!(budget.limiter_for(Side::Old).in_window(), 2);
    }

    #[test]
    fn test_per_endpoint_budget_is_independent() {
        let limiter = RateLimiter::new(10, Duration::from_secs(60));
        let mut budget = RateBudget::PerEndpoint {
            old: limiter.clone(),
            new: limiter,
        };
        budget.limiter_for(Side::Old).acquire();
        budget.limiter_for(Side::New).acquire();
        assert_eq!(budget.limiter_for(Side::Old).in_window(), 1);
        assert_eq!(budget.limiter_for(Side::New).in_window(), 1);
    }
}
