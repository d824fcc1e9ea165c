//! Lifecycle-state waiting with exponential backoff.
//!
//! Every delete-and-wait call in the sweep blocks on this generic engine
//! until the resource reaches its terminal state or the timeout elapses.

use anyhow::Result;
use backon::{BackoffBuilder, ExponentialBuilder};
use stacksweep_common::defaults::{
    DEFAULT_POLL_INITIAL_SECS, DEFAULT_POLL_MAX_SECS, DEFAULT_WAIT_TIMEOUT_SECS,
};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Configuration for state polling with exponential backoff.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// Initial delay between checks
    pub initial_delay: Duration,
    /// Maximum delay between checks (cap for exponential growth)
    pub max_delay: Duration,
    /// Maximum total time to wait before timeout
    pub timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(DEFAULT_POLL_INITIAL_SECS),
            max_delay: Duration::from_secs(DEFAULT_POLL_MAX_SECS),
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
        }
    }
}

/// Wait for a condition to hold, polling with exponential backoff.
///
/// `check` returns `Ok(true)` when the resource reached the awaited state,
/// `Ok(false)` to keep polling. Errors from the check propagate immediately.
pub async fn wait_for_state<F, Fut>(config: WaitConfig, check: F, resource_name: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = std::time::Instant::now();
    let mut attempts = 0u32;

    let backoff = ExponentialBuilder::default()
        .with_min_delay(config.initial_delay)
        .with_max_delay(config.max_delay)
        .with_factor(2.0)
        .with_jitter()
        .build();

    let mut delays = backoff.into_iter();

    loop {
        attempts += 1;

        if start.elapsed() >= config.timeout {
            anyhow::bail!(
                "Timeout waiting for {} after {:?} ({} attempts)",
                resource_name,
                config.timeout,
                attempts
            );
        }

        if check().await? {
            debug!(resource = %resource_name, attempts, "Resource reached awaited state");
            return Ok(());
        }

        let delay = delays.next().unwrap_or(config.max_delay);
        debug!(
            resource = %resource_name,
            attempt = attempts,
            delay_ms = delay.as_millis(),
            "Not in awaited state yet, polling again"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config() -> WaitConfig {
        WaitConfig {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn returns_once_condition_holds() {
        let calls = AtomicU32::new(0);
        let result = wait_for_state(
            fast_config(),
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Ok(n >= 2)
            },
            "test-resource",
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn check_errors_propagate() {
        let result = wait_for_state(
            fast_config(),
            || async { anyhow::bail!("boom") },
            "test-resource",
        )
        .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("boom"));
    }

    #[tokio::test]
    async fn times_out_when_condition_never_holds() {
        let config = WaitConfig {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            timeout: Duration::from_millis(20),
        };
        let result = wait_for_state(config, || async { Ok(false) }, "stuck-resource").await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Timeout waiting for stuck-resource"), "{err}");
    }
}
