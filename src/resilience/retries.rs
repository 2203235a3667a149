//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a failed remote call while the error is retryable
//! - Space attempts with exponential backoff + jitter
//!
//! Only transport-level failures are retried; a structured explorer error
//! is an answer, not an outage.

use std::fmt::Display;
use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::backoff_delay;

/// Attempt budget and spacing for one remote call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    pub(crate) base_delay_ms: u64,
    pub(crate) max_delay_ms: u64,
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent. Returns the last outcome.
    pub async fn run<T, E, F, Fut, R>(&self, method: &'static str, retryable: R, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && retryable(&e) => {
                    let delay = backoff_delay(self, attempt);
                    tracing::warn!(
                        method,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Remote call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        if !config.enabled {
            return Self::none();
        }
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }
}
