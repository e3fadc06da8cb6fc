//! Retry policy for rate-limited and timed-out requests

use std::time::Duration;

/// Fixed-delay retry policy injected into the page and file fetchers
///
/// The archive enforces an undocumented rate limit via HTTP 429; the
/// crawler waits a fixed interval and retries the same request. With no
/// attempt ceiling configured it retries forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed delay between attempts
    pub delay: Duration,

    /// Optional ceiling on failed attempts; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Policy that retries forever with a fixed delay
    pub fn unbounded(delay: Duration) -> Self {
        RetryPolicy {
            delay,
            max_attempts: None,
        }
    }

    /// Policy that gives up after `max_attempts` failed attempts
    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        RetryPolicy {
            delay,
            max_attempts: Some(max_attempts),
        }
    }

    /// Returns true once `attempts` failed attempts have exhausted the policy
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts >= max,
            None => false,
        }
    }
}
