//! Startup connection retry.

use std::future::Future;
use std::time::Duration;

/// Fixed-backoff policy for the initial database connection.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total number of attempts, at least one is always made.
    pub attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy that tries once and gives up.
    pub fn once() -> Self {
        Self {
            attempts: 1,
            delay: Duration::ZERO,
        }
    }

    /// Runs `connect` until it succeeds or the attempts are exhausted.
    ///
    /// Returns the last error when every attempt fails.
    pub async fn run<T, E, F, Fut>(&self, mut connect: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match connect().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < attempts => {
                    tracing::warn!(
                        attempt,
                        attempts,
                        error = %err,
                        "Database connection failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(attempts, error = %err, "Database connection failed");
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(1),
        };

        let result: Result<u32, String> = policy
            .run(|| async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 { Err(format!("attempt {n}")) } else { Ok(n) }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy {
            attempts: 2,
            delay: Duration::ZERO,
        };

        let result: Result<(), String> = policy
            .run(|| async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(format!("attempt {n}"))
            })
            .await;

        assert_eq!(result, Err("attempt 2".to_string()));
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy {
            attempts: 0,
            delay: Duration::ZERO,
        };

        let _: Result<(), &str> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("down")
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
