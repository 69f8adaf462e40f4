//! Bounded-attempt retry policy for origin fetches.

use reqwest::StatusCode;
use std::time::Duration;

/// Default number of fetch attempts (1 initial + 2 retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff between attempts in milliseconds.
pub const DEFAULT_BACKOFF_MS: u64 = 1000;

/// Statuses that flaky origins answer transiently.
pub const DEFAULT_RETRYABLE_STATUSES: [StatusCode; 2] =
    [StatusCode::FORBIDDEN, StatusCode::NOT_FOUND];

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts (minimum 1; 0 is treated as 1).
    pub max_attempts: u32,
    /// Sleep duration between consecutive attempts.
    pub backoff: Duration,
    /// Response statuses worth another attempt.
    pub retryable_statuses: Vec<StatusCode>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Whether a response with `status` on 1-based `attempt` should be retried.
    pub fn should_retry_status(&self, status: StatusCode, attempt: u32) -> bool {
        attempt < self.attempts() && self.is_retryable(status)
    }

    /// Whether a transport failure on 1-based `attempt` should be retried.
    pub fn should_retry_error(&self, attempt: u32) -> bool {
        attempt < self.attempts()
    }

    /// Delay before the attempt following `attempt`.
    pub fn backoff_for(&self, _attempt: u32) -> Duration {
        self.backoff
    }
}
