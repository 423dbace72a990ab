//! Bounded retry with a fixed interval
//!
//! Pauses go through the [`Sleeper`] trait so callers can run the same code
//! against tokio's timer in production and an instant clock in tests.

use std::future::Future;
use std::time::Duration;

/// Something that can pause the current task
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

/// Retry budget for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (never less than 1)
    pub max_attempts: u32,

    /// Fixed pause between attempts
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Runs `operation` until it succeeds or the budget is exhausted
    ///
    /// `operation` receives the 1-based attempt number. `on_failure` is called
    /// with the attempt number and error after every failed attempt. The pause
    /// happens only between attempts, never after the last one.
    ///
    /// # Returns
    ///
    /// The first success, or the error of the final attempt
    pub async fn run<T, E, F, Fut, S, L>(
        &self,
        sleeper: &S,
        mut operation: F,
        mut on_failure: L,
    ) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        S: Sleeper,
        L: FnMut(u32, &E),
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    on_failure(attempt, &e);
                    if attempt >= self.max_attempts {
                        return Err(e);
                    }
                    sleeper.sleep(self.interval).await;
                    attempt += 1;
                }
            }
        }
    }
}
