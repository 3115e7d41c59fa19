use std::time::Duration;

use http::StatusCode;

use crate::error::Error;

const RATE_LIMIT_MARKER: &str = "rate limit";

/// Inspection hooks used to decide whether a failure is a rate-limit signal.
///
/// A failure counts as rate limited when its message contains `"rate limit"`
/// (case-sensitive) or when it carries HTTP status 429.
pub trait RetryClassify {
    fn message(&self) -> String;

    fn status_code(&self) -> Option<u16> {
        None
    }

    fn is_rate_limit(&self) -> bool {
        self.status_code() == Some(StatusCode::TOO_MANY_REQUESTS.as_u16())
            || self.message().contains(RATE_LIMIT_MARKER)
    }
}

impl RetryClassify for Error {
    fn message(&self) -> String {
        self.to_string()
    }

    fn status_code(&self) -> Option<u16> {
        match self {
            Error::RateLimit => Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            Error::Status { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }
}

impl RetryClassify for anyhow::Error {
    fn message(&self) -> String {
        self.to_string()
    }

    fn status_code(&self) -> Option<u16> {
        self.chain().find_map(|cause| {
            cause
                .downcast_ref::<Error>()
                .and_then(RetryClassify::status_code)
        })
    }
}

impl RetryClassify for StatusCode {
    fn message(&self) -> String {
        self.to_string()
    }

    fn status_code(&self) -> Option<u16> {
        Some(self.as_u16())
    }
}

impl RetryClassify for String {
    fn message(&self) -> String {
        self.clone()
    }
}

impl RetryClassify for &'static str {
    fn message(&self) -> String {
        (*self).to_string()
    }
}

/// `min(max_ms, base_ms * 2^attempt)`, saturating instead of overflowing.
pub fn backoff_delay(base_ms: u64, max_ms: u64, attempt: u32) -> Duration {
    let multiplier = 2u64.checked_pow(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(multiplier).min(max_ms))
}

/// Whole seconds shown to the user, rounded half up.
pub fn delay_seconds(delay: Duration) -> u64 {
    let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    millis.saturating_add(500) / 1000
}
