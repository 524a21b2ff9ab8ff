//! Retry-with-backoff policy for network and inference calls.
//!
//! One policy value is built at startup and shared by every call site that
//! talks to the outside world (search fetch, webpage fetch, summarization),
//! so the backoff schedule lives in exactly one place.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Bounded exponential backoff: `base_delay * 2^n`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::network()
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self { max_attempts, base_delay, max_delay }
    }

    /// Policy for calls against external APIs: 3 attempts, 4 s → 10 s.
    pub const fn network() -> Self {
        Self::new(3, Duration::from_secs(4), Duration::from_secs(10))
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Run `op`, retrying on error until the attempt budget is spent.
    /// The final error is returned unchanged.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) if attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_s = delay.as_secs(),
                        "{what} failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_schedule_is_capped() {
        let p = RetryPolicy::network();
        assert_eq!(p.delay_for(0), Duration::from_secs(4));
        assert_eq!(p.delay_for(1), Duration::from_secs(8));
        assert_eq!(p.delay_for(2), Duration::from_secs(10));
        assert_eq!(p.delay_for(10), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = RetryPolicy::network()
            .run("flaky op", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err("transient".to_string())
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;
        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = RetryPolicy::network()
            .run("dead op", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("still down".to_string()) }
            })
            .await;
        assert_eq!(result, Err("still down".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
