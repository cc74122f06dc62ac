use std::time::Duration;

use tracing::warn;

use docqa_core::config::GatewaySettings;
use docqa_core::error::{Error, Result};

/// Bounded exponential backoff: `initial_backoff`, doubled after every
/// retryable failure, for at most `max_attempts` attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 4, initial_backoff: Duration::from_secs(1) }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &GatewaySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
        }
    }

    /// Delay after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent. `op` receives the 1-based attempt number.
    pub fn run<T>(&self, mut op: impl FnMut(u32) -> Result<T>, mut sleep: impl FnMut(Duration)) -> Result<T> {
        for attempt in 1..=self.max_attempts {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    if attempt < self.max_attempts {
                        let delay = self.delay_for(attempt);
                        warn!(attempt, max_attempts = self.max_attempts, delay_ms = delay.as_millis() as u64, "retryable failure: {e}");
                        sleep(delay);
                    } else {
                        warn!(attempt, "retryable failure on final attempt: {e}");
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::GenerationRetriesExhausted { attempts: self.max_attempts })
    }
}
