//! Bounded retry policy for API requests.
//!
//! Failures are classified into a [`FailureClass`] and the policy maps each
//! class to a backoff duration. The request loop in [`crate::client`] owns
//! the attempt counter; exhausting it is a defined hard error
//! ([`crate::FetchError::RetriesExhausted`]), never a hanging value.

use std::time::Duration;

/// Default attempt ceiling.
const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default delay for transport errors and non-rate-limit HTTP failures.
const DEFAULT_SHORT_DELAY_SECS: u64 = 6;

/// Default delay when the rate limit is exhausted.
const DEFAULT_RATE_LIMIT_DELAY_SECS: u64 = 6 * 60;

// ============================================================================
// Failure Classification
// ============================================================================

/// Why a request attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Transport-level failure (connection error, timeout).
    Transport,
    /// Non-success response with `x-ratelimit-remaining: 0`.
    RateLimited,
    /// Any other non-success response.
    Http,
}

// ============================================================================
// Retry Policy
// ============================================================================

/// Policy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay between attempts for transport and plain HTTP failures.
    pub short_delay: Duration,
    /// Delay between attempts once the rate limit is exhausted.
    pub rate_limit_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt ceiling and default delays.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            short_delay: Duration::from_secs(DEFAULT_SHORT_DELAY_SECS),
            rate_limit_delay: Duration::from_secs(DEFAULT_RATE_LIMIT_DELAY_SECS),
        }
    }

    /// Sets the short delay.
    pub fn with_short_delay(mut self, delay: Duration) -> Self {
        self.short_delay = delay;
        self
    }

    /// Sets the rate-limit delay.
    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Classifies a non-success response by its remaining-budget header.
    ///
    /// Zero remaining means the long backoff applies; any other value (or a
    /// missing header) is an ordinary HTTP failure.
    pub fn classify_response(remaining: Option<u64>) -> FailureClass {
        if remaining == Some(0) {
            FailureClass::RateLimited
        } else {
            FailureClass::Http
        }
    }

    /// Returns the backoff duration for a failure class.
    pub fn delay_for(&self, class: FailureClass) -> Duration {
        match class {
            FailureClass::RateLimited => self.rate_limit_delay,
            FailureClass::Transport | FailureClass::Http => self.short_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
