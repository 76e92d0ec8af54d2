use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Delays between attempts of a retried request.
///
/// The first attempt runs immediately; each entry of the expanded delay list
/// buys one more attempt after sleeping that long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Initial delays in seconds for exponential backoff
    pub backoff_secs: Vec<u64>,
    /// Number of additional retries at `final_delay_secs`
    pub final_retries: usize,
    /// Delay in seconds used for the final retries
    pub final_delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff_secs: vec![2, 4],
            final_retries: 1,
            final_delay_secs: 5,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            backoff_secs: Vec::new(),
            final_retries: 0,
            final_delay_secs: 0,
        }
    }

    fn delays(&self) -> Vec<u64> {
        self.backoff_secs
            .iter()
            .copied()
            .chain(std::iter::repeat_n(self.final_delay_secs, self.final_retries))
            .collect()
    }

    /// Total number of attempts, including the first.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.backoff_secs.len() + self.final_retries + 1
    }
}

/// Retry an async operation according to `policy`.
///
/// # Returns
/// The result of the operation if successful, or the last error if all retries fail
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = policy.max_attempts();

    for (i, delay_secs) in policy.delays().into_iter().enumerate() {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                warn!(
                    "Request failed (attempt {}/{total}): {e}. Retrying after {delay_secs}s...",
                    i + 1
                );
                sleep(Duration::from_secs(delay_secs)).await;
            }
        }
    }

    operation().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn instant(retries: usize) -> RetryPolicy {
        RetryPolicy {
            backoff_secs: vec![0; retries],
            final_retries: 1,
            final_delay_secs: 0,
        }
    }

    #[tokio::test]
    async fn retry_succeeds_on_first_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), String>(())
                }
            },
            &instant(2),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_succeeds_after_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if count < 3 {
                        Err(String::from("fail"))
                    } else {
                        Ok(())
                    }
                }
            },
            &instant(2),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_fails_after_all_attempts() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(String::from("fail"))
                }
            },
            &instant(2),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 4); // 1 + 2 backoff + 1 final
    }

    #[tokio::test]
    async fn no_retry_policy_runs_once() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(String::from("fail"))
                }
            },
            &RetryPolicy::none(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn default_policy_attempts() {
        assert_eq!(RetryPolicy::default().max_attempts(), 4);
    }
}
