//! Timeout and retry policy for review writes.
//!
//! Every write the wizard depends on goes through `SavePolicy::run`. Store
//! writes are idempotent, so re-running an attempt that timed out after the
//! store applied it is harmless.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A write that still failed after the policy gave up.
#[derive(Debug, Clone, Error)]
#[error("{operation} failed after {attempts} attempt(s): {last_error}")]
pub struct PersistenceFailure {
    pub operation: String,
    pub attempts: u32,
    pub last_error: DomainError,
}

impl PersistenceFailure {
    /// Whether asking the user to try again could help.
    pub fn is_retryable(&self) -> bool {
        self.last_error.is_transient()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePolicy {
    pub attempt_timeout: Duration,
    pub max_attempts: u32,
    /// Doubles after each failed attempt.
    pub initial_backoff: Duration,
}

impl Default for SavePolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(5),
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
        }
    }
}

impl SavePolicy {
    /// No retries and no timeout worth mentioning. For tests.
    pub fn single_attempt() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(60),
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Runs `attempt` until it succeeds, fails with a non-transient error, or
    /// the attempts run out.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, PersistenceFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut backoff = self.initial_backoff;
        let mut attempts = 0;

        loop {
            attempts += 1;
            let error = match tokio::time::timeout(self.attempt_timeout, attempt()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(error)) => error,
                Err(_) => DomainError::new(
                    ErrorCode::StorageTimeout,
                    format!("{} timed out after {:?}", operation, self.attempt_timeout),
                ),
            };

            if !error.is_transient() || attempts >= max_attempts {
                tracing::error!(
                    operation,
                    attempts,
                    error = %error,
                    "giving up on write"
                );
                return Err(PersistenceFailure {
                    operation: operation.to_string(),
                    attempts,
                    last_error: error,
                });
            }

            tracing::warn!(
                operation,
                attempt = attempts,
                retry_in_ms = backoff.as_millis() as u64,
                error = %error,
                "write failed, retrying"
            );
            tokio::time::sleep(backoff).await;
            backoff = backoff.saturating_mul(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with a transient error for the first `failures` calls.
    async fn flaky_write(calls: &AtomicU32, failures: u32) -> Result<u32, DomainError> {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= failures {
            Err(DomainError::database("connection reset"))
        } else {
            Ok(n)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result = SavePolicy::default()
            .run("save_step", || flaky_write(&calls, 2))
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let failure = SavePolicy::default()
            .run("save_step", || flaky_write(&calls, 10))
            .await
            .unwrap_err();

        assert_eq!(failure.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(failure.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_doubles_between_attempts() {
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let _ = SavePolicy::default()
            .run("save_step", || flaky_write(&calls, 10))
            .await;

        // 200ms + 400ms of backoff, attempts themselves are instant
        assert_eq!(started.elapsed(), Duration::from_millis(600));
    }

    #[tokio::test]
    async fn non_transient_errors_are_not_retried() {
        let calls = AtomicU32::new(0);

        let failure = SavePolicy::default()
            .run("save_step", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(DomainError::new(ErrorCode::ReviewNotFound, "gone")) }
            })
            .await
            .unwrap_err();

        assert_eq!(failure.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!failure.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_attempts_time_out() {
        let policy = SavePolicy {
            attempt_timeout: Duration::from_secs(5),
            max_attempts: 2,
            initial_backoff: Duration::from_millis(200),
        };

        let failure = policy
            .run("save_step", || async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<(), DomainError>(())
            })
            .await
            .unwrap_err();

        assert_eq!(failure.attempts, 2);
        assert_eq!(failure.last_error.code, ErrorCode::StorageTimeout);
        assert!(failure.is_retryable());
    }
}
