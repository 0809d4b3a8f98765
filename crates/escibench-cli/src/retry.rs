//! Retry logic with exponential backoff for query runs.
//!
//! Hosted search APIs throttle and drop connections under load; a query
//! run over thousands of queries needs transient failures retried with
//! backoff while configuration and authentication errors fail fast.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Whether to add jitter to prevent thundering herd.
    pub add_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            add_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Creates a config with the given retry count and default pacing.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Creates a config with no retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            add_jitter: false,
        }
    }

    /// Calculates the delay for a given attempt number.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_delay = self.initial_delay.as_secs_f64()
            * self
                .backoff_multiplier
                .powi(attempt.saturating_sub(1) as i32);

        let capped_delay = base_delay.min(self.max_delay.as_secs_f64());

        let final_delay = if self.add_jitter {
            // Add up to 25% jitter
            let jitter = capped_delay * 0.25 * rand_jitter();
            capped_delay + jitter
        } else {
            capped_delay
        };

        Duration::from_secs_f64(final_delay)
    }
}

/// Simple pseudo-random jitter (0.0 to 1.0) without external dependencies.
fn rand_jitter() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}

/// Determines if an error is retryable.
///
/// Rate limits, transport errors and 5xx responses are transient; auth
/// failures, configuration errors and parse failures are not.
#[must_use]
pub fn is_retryable_error(error: &Error) -> bool {
    match error {
        Error::RateLimit(_) | Error::Io(_) | Error::Http(_) => true,
        Error::Authentication(_)
        | Error::Config(_)
        | Error::Search(_)
        | Error::Dataset(_)
        | Error::Core(_)
        | Error::Json(_)
        | Error::Yaml(_)
        | Error::Csv(_) => false,
        Error::BackendConnection(msg) => {
            let msg = msg.to_lowercase();
            msg.contains("timeout")
                || msg.contains("connection")
                || msg.contains("reset")
                || msg.contains("temporary")
                || msg.contains("429")
                || msg.contains("500")
                || msg.contains("502")
                || msg.contains("503")
                || msg.contains("504")
        }
    }
}

/// Executes an async operation with retry logic.
///
/// # Errors
///
/// Returns the operation's last error if all attempts fail, or the first
/// non-retryable error immediately.
pub async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error: Option<Error> = None;
    let max_attempts = config.max_retries + 1;

    for attempt in 0..max_attempts {
        if attempt > 0 {
            let delay = config.delay_for_attempt(attempt);
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                operation_name, attempt, config.max_retries, delay
            );
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("{}: Succeeded after {} retries", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if is_retryable_error(&e) && attempt < config.max_retries {
                    warn!(
                        "{}: Retryable error (attempt {}/{}): {}",
                        operation_name,
                        attempt + 1,
                        max_attempts,
                        e
                    );
                    last_error = Some(e);
                } else {
                    return Err(e);
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| Error::BackendConnection("All retry attempts failed".to_string())))
}
