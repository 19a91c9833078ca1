//! Retry utility for transient request failures
//!
//! Provides a fixed-delay retry policy and an async driver that re-runs an
//! operation while its error is considered retryable.

use std::time::Duration;
use tokio::time::sleep;

/// Configurable retry policy for async operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (never below 1)
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

impl RetryPolicy {
    /// One attempt, no retries
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    /// Policy allowing `retries` further attempts after the first one
    pub fn with_retries(retries: usize, delay: Duration) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            delay,
        }
    }
}

/// Execute an async operation, retrying while `is_retryable` accepts the error
///
/// # Examples
/// ```rust
/// use lagpoller::core::retry::{retry_async, RetryPolicy};
/// use std::time::Duration;
///
/// # async fn example() -> Result<String, String> {
/// let result = retry_async(
///     "fetch clusters",
///     &RetryPolicy::with_retries(2, Duration::from_millis(100)),
///     |_err: &String| true,
///     || async { Ok::<String, String>("success".to_string()) },
/// )
/// .await?;
/// # Ok(result)
/// # }
/// ```
pub async fn retry_async<F, T, E, Fut, P>(
    operation_name: &str,
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                if attempt >= max_attempts || !is_retryable(&error) {
                    return Err(error);
                }
                log::warn!(
                    "'{}' failed on attempt {}/{}, retrying in {:?}: {}",
                    operation_name,
                    attempt,
                    max_attempts,
                    policy.delay,
                    error
                );
                sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
