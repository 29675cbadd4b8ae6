//! Bounded exponential backoff for transient transport failures.
//!
//! | Retry | Delay (defaults) |
//! |-------|------------------|
//! | 1     | 200ms            |
//! | 2     | 400ms            |
//! | 3     | 800ms            |
//!
//! Delays are capped at `max_delay`. Only [`FetchError::is_transient`]
//! failures are retried.
use std::future::Future;
use std::time::Duration;

use swarna_logging::swarna_warn;

use crate::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one fails.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// One attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (0-indexed): `min(base * 2^retry, max)`.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    pub(crate) async fn run<T, F, Fut>(&self, label: &str, mut attempt: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut retry = 0;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && retry < self.max_retries => {
                    let delay = self.delay_for_retry(retry);
                    swarna_warn!(
                        "{} failed ({}); retry {}/{} in {:?}",
                        label,
                        err,
                        retry + 1,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_until_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_retry(0), Duration::from_millis(200));
        assert_eq!(policy.delay_for_retry(1), Duration::from_millis(400));
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(800));
        assert_eq!(policy.delay_for_retry(5), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(40), Duration::from_secs(2));
    }
}
