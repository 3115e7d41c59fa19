pub mod cancel;
pub mod retry;
pub mod time;

pub use cancel::{Cancelled, or_cancel};
pub use retry::{RetryClassify, backoff_delay, delay_seconds};
pub use time::sleep_or_cancel;
