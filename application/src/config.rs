//! Application-level configuration.
//!
//! Controls how backend calls behave: timeout limits and the retry policy the
//! resilient gateway applies to transient failures.

use std::time::Duration;

/// Default delay before the first retry; doubled on each further attempt.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Maximum time to wait for one backend response before timing out.
    pub timeout: Option<Duration>,
    /// Extra attempts after the first one for transient failures.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub retry_backoff: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_retries: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` or zero, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Backoff before retry number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(6);
        self.retry_backoff.saturating_mul(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_disables_timeout() {
        assert_eq!(BehaviorConfig::from_timeout_seconds(Some(0)).timeout, None);
        assert_eq!(
            BehaviorConfig::from_timeout_seconds(Some(30)).timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_backoff_doubles() {
        let config = BehaviorConfig::default().with_retry_backoff(Duration::from_millis(100));
        assert_eq!(config.backoff_for(1), Duration::from_millis(100));
        assert_eq!(config.backoff_for(2), Duration::from_millis(200));
        assert_eq!(config.backoff_for(3), Duration::from_millis(400));
    }
}
