use std::path::PathBuf;
use tokio::sync::watch;
use tracing::warn;

use crate::config::settings::{DEFAULT_CONFIG_PATH, ENV_PREFIX, Settings};
use crate::models::{RetryOptions, RetryPolicy};

/// Source of retry options, consulted at the start of every invocation.
pub trait SettingsProvider: Send + Sync {
    fn retry_options(&self) -> RetryOptions;
}

impl SettingsProvider for RetryOptions {
    fn retry_options(&self) -> RetryOptions {
        self.clone()
    }
}

impl SettingsProvider for RetryPolicy {
    fn retry_options(&self) -> RetryOptions {
        RetryOptions {
            max_retries: Some(self.max_retries),
            base_delay_ms: Some(self.base_delay_ms),
            max_delay_ms: Some(self.max_delay_ms),
            retry_all_errors: Some(self.retry_all_errors),
            show_notification: Some(self.show_notification),
            language: Some(self.language),
        }
    }
}

impl SettingsProvider for watch::Receiver<RetryOptions> {
    fn retry_options(&self) -> RetryOptions {
        self.borrow().clone()
    }
}

/// Adapts a closure into a [`SettingsProvider`].
pub struct FnSettings<F>(pub F);

impl<F> SettingsProvider for FnSettings<F>
where
    F: Fn() -> RetryOptions + Send + Sync,
{
    fn retry_options(&self) -> RetryOptions {
        (self.0)()
    }
}

/// Re-reads the layered configuration on every lookup.
///
/// Loading is synchronous file I/O on the task that starts each invocation.
/// For hot paths, reload elsewhere and publish through a
/// `watch::Receiver<RetryOptions>` instead.
#[derive(Debug, Clone)]
pub struct ConfigSettings {
    path: PathBuf,
    env_prefix: String,
}

impl ConfigSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

impl SettingsProvider for ConfigSettings {
    fn retry_options(&self) -> RetryOptions {
        let path = self.path.to_string_lossy();
        match Settings::load(&path, &self.env_prefix) {
            Ok(settings) => settings.retry,
            Err(e) => {
                warn!(
                    error = %e,
                    path = %path,
                    "Failed to load retry settings, using defaults"
                );
                RetryOptions::default()
            }
        }
    }
}
