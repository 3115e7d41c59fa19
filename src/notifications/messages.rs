use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::models::Notification;
use crate::utils::retry::delay_seconds;

pub const RATE_LIMIT_TITLE: &str = "Rate Limit";

/// Language of the retry notice. `Japanese` produces the
/// `リトライ n/m` / `N秒後に再試行します` wording used by earlier releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "ja")]
    Japanese,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ja" | "japanese" | "日本語" => Ok(Language::Japanese),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
        }
    }

    fn retry_attempt(&self, attempt: u32, total: u32) -> String {
        match self {
            Language::English => format!("Retry {attempt}/{total}"),
            Language::Japanese => format!("リトライ {attempt}/{total}"),
        }
    }

    fn retrying_in(&self, seconds: u64) -> String {
        match self {
            Language::English if seconds == 1 => "Retrying in 1 second".to_string(),
            Language::English => format!("Retrying in {seconds} seconds"),
            Language::Japanese => format!("{seconds}秒後に再試行します"),
        }
    }
}

/// Builds the notice shown before sleeping after failed `attempt` (0-indexed).
pub fn retry_notification(
    language: Language,
    attempt: u32,
    max_retries: u32,
    delay: Duration,
) -> Notification {
    Notification {
        title: RATE_LIMIT_TITLE.to_string(),
        subtitle: language.retry_attempt(attempt + 1, max_retries),
        message: language.retrying_in(delay_seconds(delay)),
    }
}
