//! Poll-until-condition helpers
//!
//! Ledger consensus, mirror-node ingestion and relay availability are only
//! eventually consistent with each other, so tests observe the network by
//! probing repeatedly until a predicate holds or a fixed attempt budget runs
//! out.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default delay between probes
pub const DEFAULT_WAIT_STEP_MS: u64 = 1_000;

/// Default probe budget
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Fixed-interval retry budget. Owned by the caller; nothing carries over
/// between waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay between consecutive probes, in milliseconds
    pub wait_step_ms: u64,
    /// Upper bound on probe invocations
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// Create a policy
    pub const fn new(wait_step_ms: u64, max_attempts: u32) -> Self {
        Self {
            wait_step_ms,
            max_attempts,
        }
    }

    /// Delay between consecutive probes
    pub fn wait_step(&self) -> Duration {
        Duration::from_millis(self.wait_step_ms)
    }

    /// Worst-case time spent sleeping before giving up
    pub fn max_wait(&self) -> Duration {
        self.wait_step()
            .checked_mul(self.max_attempts.saturating_sub(1))
            .unwrap_or(Duration::MAX)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT_STEP_MS, DEFAULT_MAX_ATTEMPTS)
    }
}

/// The awaited condition never held within the attempt budget
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timed out waiting for {label} after {attempts} attempts")]
pub struct PollTimeoutError {
    /// Caller-supplied description of the awaited condition
    pub label: String,
    /// Number of probes made
    pub attempts: u32,
}

/// Probe until `predicate` accepts the result.
///
/// Returns the first accepted result without sleeping. Otherwise sleeps
/// `policy.wait_step()` between probes, so a result accepted on probe `k`
/// costs exactly `k - 1` sleeps. After `policy.max_attempts` rejected
/// results the wait fails with [`PollTimeoutError`]; there is no sleep after
/// the final probe.
///
/// A probe error is returned as-is and ends the wait immediately.
pub async fn wait_for_condition<T, E, F, Fut, P>(
    label: &str,
    policy: &RetryPolicy,
    mut probe: F,
    predicate: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&T) -> bool,
    E: From<PollTimeoutError>,
{
    for attempt in 1..=policy.max_attempts {
        let result = probe().await?;
        if predicate(&result) {
            debug!(label, attempt, "condition met");
            return Ok(result);
        }

        debug!(label, attempt, max_attempts = policy.max_attempts, "condition not met yet");
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.wait_step()).await;
        }
    }

    warn!(label, attempts = policy.max_attempts, "gave up waiting");
    Err(PollTimeoutError {
        label: label.to_string(),
        attempts: policy.max_attempts,
    }
    .into())
}

/// Probe until it yields `Some`, and return the inner value.
pub async fn wait_for_some<T, E, F, Fut>(label: &str, policy: &RetryPolicy, probe: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: From<PollTimeoutError>,
{
    let found = wait_for_condition(label, policy, probe, |found: &Option<T>| found.is_some()).await?;
    found.ok_or_else(|| {
        PollTimeoutError {
            label: label.to_string(),
            attempts: policy.max_attempts,
        }
        .into()
    })
}

/// Unconditional delay between test steps
pub async fn pause(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_wait_step() {
        let policy = RetryPolicy::new(250, 4);
        assert_eq!(policy.wait_step(), Duration::from_millis(250));
        assert_eq!(policy.max_wait(), Duration::from_millis(750));
        assert_eq!(RetryPolicy::new(250, 0).max_wait(), Duration::ZERO);
    }

    #[test]
    fn test_max_wait_saturates() {
        let policy = RetryPolicy::new(u64::MAX, u32::MAX);
        assert_eq!(policy.max_wait(), Duration::MAX);
    }

    #[test]
    fn test_policy_partial_table_uses_defaults() {
        let policy: RetryPolicy = toml::from_str("max_attempts = 5").unwrap();
        assert_eq!(policy, RetryPolicy::new(DEFAULT_WAIT_STEP_MS, 5));

        let policy: RetryPolicy = toml::from_str("wait_step_ms = 250").unwrap();
        assert_eq!(policy, RetryPolicy::new(250, DEFAULT_MAX_ATTEMPTS));
    }

    #[test]
    fn test_timeout_message_names_label() {
        let err = PollTimeoutError {
            label: "schedule 0.0.1002 execution".to_string(),
            attempts: 5,
        };
        assert_eq!(
            err.to_string(),
            "timed out waiting for schedule 0.0.1002 execution after 5 attempts"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_times_out_without_probing() {
        let mut calls = 0u32;
        let result: Result<bool, PollTimeoutError> = wait_for_condition(
            "nothing",
            &RetryPolicy::new(100, 0),
            || {
                calls += 1;
                async { Ok(true) }
            },
            |ready| *ready,
        )
        .await;
        assert_eq!(result.unwrap_err().attempts, 0);
        assert_eq!(calls, 0);
    }
}
