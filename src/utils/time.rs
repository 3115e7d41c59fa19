use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::utils::cancel::or_cancel;

/// Sleeps for `delay` unless `token` is cancelled first.
///
/// Returns `false` when the sleep was cut short by cancellation.
pub async fn sleep_or_cancel(delay: Duration, token: &CancellationToken) -> bool {
    or_cancel(tokio::time::sleep(delay), token).await.is_ok()
}
