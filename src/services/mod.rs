pub mod with_retry;

pub use with_retry::WithRetry;
