//! Retry with exponential backoff for service reads.
//!
//! `RetryContext` re-runs an operation while its error classifies as
//! [`ErrorRetryStrategy::Retry`], sleeping 1s, 2s, 4s between attempts.

use std::{future::Future, time::Duration};

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Retry policy for database reads.
///
/// - **Max attempts**: 3
/// - **Backoff**: exponential from 1 second
/// - Errors classified as `Fail` return immediately
///
/// ```ignore
/// let db = db.clone();
///
/// let standings = RetryContext::new()
///     .execute_with_retry("standings query", || {
///         let db = db.clone();
///
///         async move { Ok(ResultsRepository::new(&db).get_standings().await?) }
///     })
///     .await?;
/// ```
pub struct RetryContext {
    max_attempts: u32,
    /// Doubles with each retry
    initial_backoff: Duration,
}

impl RetryContext {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Self::DEFAULT_INITIAL_BACKOFF,
        }
    }

    /// Overrides the first backoff, used by tests to avoid real sleeps
    pub fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    /// Runs `operation` until it succeeds, fails permanently or runs out of attempts
    pub async fn execute_with_retry<R, F, Fut>(
        &self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<R, Error>>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            let e = match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => e,
            };

            if e.to_retry_strategy() == ErrorRetryStrategy::Fail {
                tracing::debug!("Permanent error for {}: {}", description, e);
                return Err(e);
            }

            attempt_count += 1;
            if attempt_count >= self.max_attempts {
                tracing::error!(
                    "Giving up on {} after {} attempts: {}",
                    description,
                    self.max_attempts,
                    e
                );
                return Err(e);
            }

            let backoff = self.initial_backoff * 2_u32.pow(attempt_count - 1);
            tracing::warn!("Retrying {} in {:?}: {}", description, backoff, e);

            tokio::time::sleep(backoff).await;
        }
    }
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicU32, Ordering},
        time::Duration,
    };

    use sea_orm::{DbErr, RuntimeErr};

    use crate::server::{
        error::{lineup::LineupError, Error},
        service::retry::RetryContext,
    };

    fn retry() -> RetryContext {
        RetryContext::new().with_initial_backoff(Duration::from_millis(1))
    }

    fn connection_error() -> Error {
        Error::DbErr(DbErr::Conn(RuntimeErr::Internal("refused".to_string())))
    }

    /// Expected: a transient error is retried until the operation succeeds
    #[tokio::test]
    async fn retries_transient_errors() {
        let attempts = AtomicU32::new(0);
        let counter = &attempts;

        let result = retry()
            .execute_with_retry("flaky read", move || async move {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    return Err(connection_error());
                }
                Ok(attempt)
            })
            .await;

        assert_eq!(result.ok(), Some(3));
    }

    /// Expected: permanent errors return after one attempt
    #[tokio::test]
    async fn stops_on_permanent_error() {
        let attempts = AtomicU32::new(0);
        let counter = &attempts;

        let result: Result<(), Error> = retry()
            .execute_with_retry("bad input", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::LineupError(LineupError::NoUpcomingRace))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    /// Expected: gives up after three attempts
    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let attempts = AtomicU32::new(0);
        let counter = &attempts;

        let result: Result<(), Error> = retry()
            .execute_with_retry("dead connection", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(connection_error())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
