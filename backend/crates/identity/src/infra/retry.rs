//! Bounded retry for transient store errors
//!
//! Each attempt runs under the store operation timeout. Only errors for
//! which `IdentityError::is_transient` holds are retried.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::application::config::RetryConfig;
use crate::error::{IdentityError, IdentityResult};

/// Run `f` until it succeeds, fails with a non-transient error, or the retry
/// budget is spent.
pub async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    operation_timeout: Duration,
    operation: &'static str,
    f: F,
) -> IdentityResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = IdentityResult<T>>,
{
    let mut attempt = 0;

    loop {
        let result = match timeout(operation_timeout, f()).await {
            Ok(result) => result,
            Err(_) => Err(IdentityError::StoreTimeout(operation)),
        };

        match result {
            Ok(value) => {
                if attempt > 0 {
                    debug!(
                        operation = %operation,
                        attempt = attempt + 1,
                        "Store operation succeeded after retry"
                    );
                }
                return Ok(value);
            }
            Err(e) if !e.is_transient() || attempt >= config.max_retries => {
                if attempt > 0 {
                    warn!(
                        operation = %operation,
                        attempts = attempt + 1,
                        error = %e,
                        "Store operation failed after retries"
                    );
                }
                return Err(e);
            }
            Err(e) => {
                let delay = config.delay_for(attempt);
                warn!(
                    operation = %operation,
                    attempt = attempt + 1,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient store error, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_retry(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = with_retry(&fast_retry(3), Duration::from_secs(1), "get_item", || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(IdentityError::StoreThrottled("slow down".to_string()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: IdentityResult<()> =
            with_retry(&fast_retry(2), Duration::from_secs(1), "put_item", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(IdentityError::StoreConnection("refused".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(IdentityError::StoreConnection(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: IdentityResult<()> =
            with_retry(&fast_retry(5), Duration::from_secs(1), "scan", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(IdentityError::StoreOperation {
                        operation: "scan",
                        message: "ResourceNotFoundException".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(IdentityError::StoreOperation { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let result: IdentityResult<()> = with_retry(
            &RetryConfig::no_retry(),
            Duration::from_millis(10),
            "get_item",
            || async {
                sleep(Duration::from_secs(5)).await;
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(IdentityError::StoreTimeout("get_item"))));
    }
}
