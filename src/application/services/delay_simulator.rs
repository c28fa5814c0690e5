use std::sync::Arc;
use std::time::Duration;

use crate::domain::DelayConfig;

/// Applies the configured latency for a request.
///
/// The wait is a tokio timer owned by the caller's future: only that request is
/// suspended, and dropping the future cancels the timer.
pub struct DelaySimulator {
    config: Arc<DelayConfig>,
}

impl DelaySimulator {
    pub fn new(config: Arc<DelayConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DelayConfig {
        &self.config
    }

    pub fn delay_for(&self, method: &str, path: &str) -> Duration {
        self.config.lookup(method, path)
    }

    /// Waits out the delay configured for `method` and `path`, returning it.
    pub async fn simulate(&self, method: &str, path: &str) -> Duration {
        let delay = self.delay_for(method, path);
        if delay.is_zero() {
            return delay;
        }

        tracing::debug!(
            method = %method,
            path = %path,
            delay_ms = delay.as_millis() as u64,
            "Simulating stub latency"
        );
        tokio::time::sleep(delay).await;
        delay
    }
}
