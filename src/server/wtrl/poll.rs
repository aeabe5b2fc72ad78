//! Backoff settings and outcome of the WTRL 202-polling loop.
//!
//! WTRL answers `202 Accepted` while it is still building a results or league
//! document. The client keeps asking with a growing, jittered delay until it gets a
//! `200`, a hard failure, or runs out of attempts.

use std::{fmt, time::Duration};

use rand::Rng;
use serde_json::Value;

/// Characters of the response body kept for diagnostics
pub const EXCERPT_LEN: usize = 800;

#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum number of requests before giving up
    pub max_retries: u32,
    /// Delay before the second request
    pub initial_delay: Duration,
    /// Upper bound for the delay between requests
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
    /// Random delay added on top of each wait, uniform in `[0, max_jitter)`
    pub max_jitter: Duration,
    /// Timeout for a single HTTP request
    pub request_timeout: Duration,
    /// Pause between import segments so WTRL does not rate-limit us
    pub segment_pause: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_retries: 14,
            initial_delay: Duration::from_millis(1200),
            max_delay: Duration::from_secs(8),
            multiplier: 1.8,
            max_jitter: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            segment_pause: Duration::from_millis(900),
        }
    }
}

impl PollConfig {
    /// Millisecond delays and no pauses, for tests against a local mock server
    pub fn fast(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            multiplier: 1.8,
            max_jitter: Duration::ZERO,
            request_timeout: Duration::from_secs(5),
            segment_pause: Duration::ZERO,
        }
    }

    /// Backoff before the request following `attempt` (0-based), without jitter
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }

    /// Backoff plus a random jitter
    pub fn sleep_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.delay_for_attempt(attempt);

        if self.max_jitter.is_zero() {
            return base;
        }

        let jitter = rand::rng().random_range(0.0..self.max_jitter.as_secs_f64());
        base + Duration::from_secs_f64(jitter)
    }
}

/// Why polling gave up
#[derive(Debug, Clone, PartialEq)]
pub struct PollFailure {
    /// Last HTTP status seen, `None` when every attempt failed at the network level
    pub status: Option<u16>,
    /// First [`EXCERPT_LEN`] characters of the last body or transport error
    pub excerpt: String,
    pub attempts: u32,
}

impl fmt::Display for PollFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}", status),
            None => f.write_str("HTTP N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Ready(Value),
    Failed(PollFailure),
}

impl PollOutcome {
    pub fn into_result(self) -> Result<Value, PollFailure> {
        match self {
            Self::Ready(body) => Ok(body),
            Self::Failed(failure) => Err(failure),
        }
    }
}

pub fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Expected: the delay grows by 1.8x and is capped at 8 seconds
    #[test]
    fn delay_grows_until_capped() {
        let config = PollConfig::default();

        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(1200));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(2160));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(3888));
        assert_eq!(config.delay_for_attempt(5), Duration::from_secs(8));
        assert_eq!(config.delay_for_attempt(13), Duration::from_secs(8));
    }

    /// Expected: jitter stays below half a second
    #[test]
    fn jitter_is_bounded() {
        let config = PollConfig::default();

        for attempt in 0..14 {
            let base = config.delay_for_attempt(attempt);
            let slept = config.sleep_for_attempt(attempt);

            assert!(slept >= base);
            assert!(slept < base + Duration::from_millis(500));
        }
    }

    /// Expected: excerpts keep at most 800 characters
    #[test]
    fn truncates_excerpt() {
        let body = "x".repeat(2000);

        assert_eq!(excerpt(&body).len(), EXCERPT_LEN);
        assert_eq!(excerpt("short"), "short");
    }
}
