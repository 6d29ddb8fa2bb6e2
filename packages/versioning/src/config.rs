//! Versioning configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry behaviour for transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryPolicy {
    /// Total tries, including the first one. `0` behaves like `1`.
    pub attempts: u32,
    /// Base delay; the n-th retry waits `n * backoff_ms`.
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_ms: 250,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            attempts: 1,
            backoff_ms: 0,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.attempts.max(1)
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(retry)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersioningConfig {
    pub retry: RetryPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy {
            attempts: 4,
            backoff_ms: 100,
        };
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(3), Duration::from_millis(300));
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            attempts: 0,
            backoff_ms: 0,
        };
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_config_from_json() {
        let config: VersioningConfig =
            serde_json::from_str(r#"{ "retry": { "attempts": 5 } }"#).unwrap();
        assert_eq!(config.retry.attempts, 5);
        assert_eq!(config.retry.backoff_ms, 250);
    }
}
