//! Backoff for transient transport failures
//!
//! A dropped connection or a gateway hiccup should not fail a whole
//! credential check, so each request gets a small retry budget.

use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry budget and delay window
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// Fail on the first error
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Default delays with the budget given by `--retries`
    pub fn with_max_retries(max_retries: u32) -> Self {
        match max_retries {
            0 => Self::no_retry(),
            n => Self {
                max_retries: n,
                ..Self::default()
            },
        }
    }

    /// Delay before retry number `retry` (0-based)
    ///
    /// Doubles from `initial_delay` up to `max_delay`, then picks a point in
    /// the upper half of that window.
    pub fn backoff(&self, retry: u32) -> Duration {
        let window = self
            .initial_delay
            .saturating_mul(1 << retry.min(16))
            .min(self.max_delay);
        window.mul_f64(rand::thread_rng().gen_range(0.5..=1.0))
    }
}

/// Run `operation` until it succeeds, fails with an error `is_retryable`
/// rejects, or the budget in `config` is spent
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    config: &RetryConfig,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut retry = 0;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retry >= config.max_retries || !is_retryable(&err) {
            return Err(err);
        }

        let delay = config.backoff(retry);
        retry += 1;
        tracing::debug!(retry, budget = config.max_retries, error = %err, ?delay, "retrying request");
        tokio::time::sleep(delay).await;
    }
}
