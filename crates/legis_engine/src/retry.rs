use std::future::Future;
use std::time::Duration;

use scrape_logging::{scrape_debug, scrape_warn};

use crate::{FetchError, ScrapeError};

/// What to do once the timeout ceiling is reached without a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnExhaustion {
    /// Return [`ScrapeError::FetchExhausted`].
    Fail,
    /// Log a warning and return `Ok(None)`.
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_timeout: Duration,
    pub multiplier: u32,
    pub max_timeout: Duration,
    pub on_exhaustion: OnExhaustion,
}

impl RetryPolicy {
    /// 8s, 16s, 32s, 64s, then give up.
    pub fn fail_fast() -> Self {
        Self {
            initial_timeout: Duration::from_secs(8),
            multiplier: 2,
            max_timeout: Duration::from_secs(65),
            on_exhaustion: OnExhaustion::Fail,
        }
    }

    pub fn warn_and_skip() -> Self {
        Self {
            on_exhaustion: OnExhaustion::Warn,
            ..Self::fail_fast()
        }
    }

    pub fn with_exhaustion(mut self, on_exhaustion: OnExhaustion) -> Self {
        self.on_exhaustion = on_exhaustion;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::warn_and_skip()
    }
}

/// Calls `fetch_fn` with a growing timeout until it succeeds or the timeout
/// reaches `policy.max_timeout`.
///
/// Only timeouts are retried; any other failure is returned at once. The
/// bound is on the timeout value, not on the number of attempts. A
/// multiplier that cannot grow the timeout stops after the first attempt.
pub async fn fetch_with_backoff<T, F, Fut>(
    mut fetch_fn: F,
    policy: &RetryPolicy,
) -> Result<Option<T>, ScrapeError>
where
    F: FnMut(Duration) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut timeout = policy.initial_timeout;
    let mut attempts: u32 = 0;
    let mut last_timeout = timeout;

    while timeout < policy.max_timeout {
        attempts += 1;
        last_timeout = timeout;
        match fetch_fn(timeout).await {
            Ok(content) => return Ok(Some(content)),
            Err(err) if err.is_timeout() => {
                let next = timeout.saturating_mul(policy.multiplier);
                scrape_debug!(
                    "Timed out after {:?}, increasing to {:?} and trying again",
                    timeout,
                    next
                );
                if next <= timeout {
                    break;
                }
                timeout = next;
            }
            Err(err) => return Err(ScrapeError::Fetch(err)),
        }
    }

    match policy.on_exhaustion {
        OnExhaustion::Fail => Err(ScrapeError::FetchExhausted {
            attempts,
            last_timeout,
        }),
        OnExhaustion::Warn => {
            scrape_warn!(
                "Gave up after {} attempts (last timeout {:?}), moving on",
                attempts,
                last_timeout
            );
            Ok(None)
        }
    }
}
