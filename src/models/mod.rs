mod notification;
mod policy;

pub use notification::Notification;
pub use policy::{
    Classification, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_ALL_ERRORS, DEFAULT_SHOW_NOTIFICATION, RetryOptions, RetryPolicy,
};
