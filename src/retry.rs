//! Bounded retry with exponential backoff for upstream calls.
//!
//! Only transient transport failures ([`ExportError::is_transient`]) are
//! retried. Authentication, API and decoding failures return immediately.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::error::ExportError;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Retry settings for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff: Duration,
}

impl Default for RetryPolicy {
    /// A single attempt with no retries.
    fn default() -> Self {
        Self::new(0, Duration::from_millis(500))
    }
}

impl RetryPolicy {
    /// Creates a policy allowing `max_retries` extra attempts.
    #[must_use]
    pub const fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// Delay before retry number `attempt` (zero-based), doubling each time
    /// and capped at thirty seconds.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
    }

    /// Runs `operation`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns the first non-transient error, or the last transient error
    /// once retries are exhausted.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, ExportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ExportError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < self.max_retries => {
                    let delay = self.backoff_for(attempt);
                    attempt += 1;
                    warn!(
                        operation = label,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "transient failure, retrying"
                    );
                    sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use rstest::rstest;

    use super::RetryPolicy;
    use crate::error::ExportError;

    fn network_error() -> ExportError {
        ExportError::Network {
            service: "GitHub",
            message: "connection reset".to_owned(),
        }
    }

    #[rstest]
    #[case(0, 500)]
    #[case(1, 1_000)]
    #[case(3, 4_000)]
    #[case(10, 30_000)]
    #[case(40, 30_000)]
    fn backoff_doubles_and_caps(#[case] attempt: u32, #[case] expected_ms: u64) {
        let policy = RetryPolicy::new(5, Duration::from_millis(500));

        assert_eq!(policy.backoff_for(attempt), Duration::from_millis(expected_ms));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(10));

        let result = policy
            .run("list issues", || {
                let call = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if call < 2 {
                        Err(network_error())
                    } else {
                        Ok(call)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(2, Duration::from_millis(10));

        let result: Result<(), ExportError> = policy
            .run("list issues", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(network_error()) }
            })
            .await;

        assert_eq!(result, Err(network_error()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn default_policy_makes_a_single_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<(), ExportError> = RetryPolicy::default()
            .run("enrichment", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(network_error()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn authentication_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Duration::from_millis(1));

        let result: Result<(), ExportError> = policy
            .run("enrichment", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(ExportError::Authentication {
                        service: "ZenHub",
                        message: "bad token".to_owned(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(ExportError::Authentication { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
