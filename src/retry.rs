// Bounded retry for transient failures.
//
// Wraps an async operation and re-runs it while its error is classified as
// transient, up to an explicit attempt cap. The delay between attempts is
// pluggable; the feed fetcher uses `Backoff::None` so the only wait is
// whatever the transport's own timeout imposes.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Delay strategy between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Retry immediately.
    None,
    /// Wait the same duration before every retry.
    Fixed(Duration),
    /// base * 2^(retry - 1), capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `retry` (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        match self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(d) => *d,
            Backoff::Exponential { base, max } => {
                let shift = retry.saturating_sub(1).min(31);
                base.saturating_mul(1u32 << shift).min(*max)
            }
        }
    }
}

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never less than 1.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::None,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Run `operation` until it succeeds, fails with a non-transient error,
/// or `policy.max_attempts` attempts have been made. The last error is
/// returned when the cap is exhausted.
pub async fn with_retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    is_transient: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient(&err) || attempt >= max_attempts {
                    return Err(err);
                }

                warn!(
                    attempt = attempt,
                    max_attempts = max_attempts,
                    error = %err,
                    "Transient failure, retrying [{}/{}]",
                    attempt,
                    max_attempts,
                );

                let delay = policy.backoff.delay(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}
