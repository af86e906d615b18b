//! Retry logic with exponential backoff
//!
//! Only idempotent backend reads go through [`RetryPolicy::execute`]; the
//! comparison POST is sent once.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Backoff multiplier (typically 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
        }
    }

    /// Create a policy with no retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_secs(0),
            max_backoff: Duration::from_secs(0),
            backoff_multiplier: 1.0,
        }
    }

    /// Create a policy with fast retries (for testing)
    pub fn fast() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(100),
            backoff_multiplier: 2.0,
        }
    }

    /// Backoff to wait before the given retry (attempt 0 is the first try)
    fn backoff_duration(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        Duration::from_millis(backoff_ms as u64).min(self.max_backoff)
    }

    /// Execute an async operation, retrying transient failures
    ///
    /// Non-retryable errors are returned immediately; otherwise the last
    /// error is returned once attempts run out. See
    /// [`CompareError::is_retryable`](crate::CompareError::is_retryable).
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            debug!(
                "Attempt {}/{} for operation: {}",
                attempt + 1,
                attempts,
                operation_name
            );

            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(
                            "Operation '{}' succeeded after {} retries",
                            operation_name, attempt
                        );
                    }
                    return Ok(result);
                }
                Err(e) if !e.is_retryable() => {
                    debug!("Operation '{}' failed with non-retryable error", operation_name);
                    return Err(e);
                }
                Err(e) if attempt + 1 >= attempts => {
                    warn!(
                        "Operation '{}' failed after {} attempts: {}",
                        operation_name, attempts, e
                    );
                    return Err(e);
                }
                Err(e) => {
                    attempt += 1;
                    let backoff = self.backoff_duration(attempt);
                    warn!(
                        "Operation '{}' failed (attempt {}/{}): {}. Retrying in {:?}",
                        operation_name, attempt, attempts, e, backoff
                    );
                    sleep(backoff).await;
                }
            }
        }
    }
}
