//! Retry wrapper for streaming operations that call rate-limited services.
//!
//! [`WithRetry`] restarts a failed stream from scratch with exponential
//! backoff, optionally telling the user through a [`Notifier`] before each
//! wait. Policy values come from a [`SettingsProvider`] that is consulted on
//! every invocation, so configuration changes apply to the next call.

pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod services;
pub mod utils;

pub use config::{ConfigSettings, FnSettings, Settings, SettingsProvider};
pub use error::{Error, Result};
pub use models::{Classification, Notification, RetryOptions, RetryPolicy};
pub use notifications::{ChannelNotifier, FnNotifier, Language, LogNotifier, Notifier};
pub use services::WithRetry;
pub use utils::RetryClassify;
