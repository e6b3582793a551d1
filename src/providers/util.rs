use crate::core::config::FactsheetProviderConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// How often, and how far apart, a failed request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &FactsheetProviderConfig) -> Self {
        Self {
            retries: config.retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Runs `operation` until it succeeds or the attempts run out, returning
    /// the last error. `target` only labels the debug logs.
    pub async fn run<F, Fut, T, E>(&self, target: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let attempts = self.retries + 1;
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(val) => return Ok(val),
                Err(err) if attempt < attempts => {
                    debug!(%target, attempt, attempts, error = %err, "Request failed, retrying");
                    attempt += 1;
                    tokio::time::sleep(self.delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
