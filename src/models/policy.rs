use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::notifications::Language;
use crate::utils::retry::{RetryClassify, backoff_delay};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 10_000;
pub const DEFAULT_RETRY_ALL_ERRORS: bool = false;
pub const DEFAULT_SHOW_NOTIFICATION: bool = true;

/// Partially specified retry settings, as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryOptions {
    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub retry_all_errors: Option<bool>,
    pub show_notification: Option<bool>,
    pub language: Option<Language>,
}

impl RetryOptions {
    pub fn resolve(&self) -> RetryPolicy {
        let max_retries = match self.max_retries {
            Some(0) => {
                warn!("max_retries must be at least 1, using 1");
                1
            }
            Some(n) => n,
            None => DEFAULT_MAX_RETRIES,
        };

        RetryPolicy {
            max_retries,
            base_delay_ms: self.base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS),
            max_delay_ms: self.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS),
            retry_all_errors: self.retry_all_errors.unwrap_or(DEFAULT_RETRY_ALL_ERRORS),
            show_notification: self.show_notification.unwrap_or(DEFAULT_SHOW_NOTIFICATION),
            language: self.language.unwrap_or_default(),
        }
    }
}

/// Fully resolved retry policy for one invocation of a wrapped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub retry_all_errors: bool,
    pub show_notification: bool,
    pub language: Language,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryOptions::default().resolve()
    }
}

/// Outcome of inspecting a failure against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub rate_limited: bool,
    pub retryable: bool,
}

impl RetryPolicy {
    /// Backoff before the attempt following `attempt` (0-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        backoff_delay(self.base_delay_ms, self.max_delay_ms, attempt)
    }

    pub fn is_last_attempt(&self, attempt: u32) -> bool {
        attempt.saturating_add(1) >= self.max_retries
    }

    pub fn classify<E: RetryClassify + ?Sized>(&self, error: &E) -> Classification {
        let rate_limited = error.is_rate_limit();
        Classification {
            rate_limited,
            retryable: self.retry_all_errors || rate_limited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_options_resolve_to_defaults() {
        let policy = RetryOptions::default().resolve();

        assert_eq!(
            policy,
            RetryPolicy {
                max_retries: 3,
                base_delay_ms: 1_000,
                max_delay_ms: 10_000,
                retry_all_errors: false,
                show_notification: true,
                language: Language::English,
            }
        );
    }

    #[test]
    fn provided_fields_override_defaults() {
        let options = RetryOptions {
            max_retries: Some(5),
            show_notification: Some(false),
            language: Some(Language::Japanese),
            ..Default::default()
        };

        let policy = options.resolve();

        assert_eq!(policy.max_retries, 5);
        assert!(!policy.show_notification);
        assert_eq!(policy.language, Language::Japanese);
        assert_eq!(policy.base_delay_ms, DEFAULT_BASE_DELAY_MS);
    }

    #[test]
    fn zero_retries_clamps_to_one() {
        let options = RetryOptions {
            max_retries: Some(0),
            ..Default::default()
        };

        assert_eq!(options.resolve().max_retries, 1);
    }

    #[test]
    fn default_delays_follow_schedule() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for(0), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4_000));
        assert_eq!(policy.delay_for(4), Duration::from_millis(10_000));
    }

    #[test]
    fn last_attempt_is_max_minus_one() {
        let policy = RetryPolicy::default();

        assert!(!policy.is_last_attempt(1));
        assert!(policy.is_last_attempt(2));
    }

    #[test]
    fn classification_respects_retry_all_errors() {
        let strict = RetryPolicy::default();
        let lenient = RetryPolicy {
            retry_all_errors: true,
            ..strict
        };
        let failure = Error::Notification("boom".into());

        assert_eq!(
            strict.classify(&Error::RateLimit),
            Classification {
                rate_limited: true,
                retryable: true,
            }
        );
        assert_eq!(
            strict.classify(&failure),
            Classification {
                rate_limited: false,
                retryable: false,
            }
        );
        assert_eq!(
            lenient.classify(&failure),
            Classification {
                rate_limited: false,
                retryable: true,
            }
        );
    }
}
