use crate::error::ApiError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Internal decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Retry budget and backoff schedule for non-streaming calls.
///
/// Important constraints:
/// - Pure exponential backoff (`base_delay * 2^attempt`), no jitter, no cap.
/// - Only transient failures are retried; see [`ApiError::is_transient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts is `max_retries + 1`.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Total number of attempts the budget allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait after failed attempt `attempt` (0-based) before the next one.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Decide what to do next after an attempt failed.
    ///
    /// - `attempt` is 0-based (first failure => attempt=0).
    pub(crate) fn decide(&self, err: &ApiError, attempt: u32) -> Decision {
        if err.is_transient() && attempt < self.max_retries {
            Decision::Retry {
                delay: self.backoff_delay(attempt),
            }
        } else {
            Decision::Fail
        }
    }
}

/// Drive `attempt_fn` under `policy`, sleeping with `sleep` between attempts.
///
/// `attempt_fn` receives the 0-based attempt index. Both the attempt and the
/// sleep are injected so the schedule can be observed without a network or a
/// real clock.
pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    policy: &RetryPolicy,
    mut attempt_fn: Op,
    mut sleep: Sleep,
) -> Result<T, ApiError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, ApiError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 0u32;

    loop {
        debug!(attempt, "chatroutes attempt started");

        let err = match attempt_fn(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        match policy.decide(&err, attempt) {
            Decision::Retry { delay } => {
                info!(
                    attempt,
                    http_status = err.http_status(),
                    error_kind = err.kind().name(),
                    delay_ms = delay.as_millis() as u64,
                    "chatroutes request failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Decision::Fail => return Err(err),
        }
    }
}
