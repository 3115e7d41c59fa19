//! Cancellation-aware futures.

use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Races `future` against `token`, returning `Err(Cancelled)` if the token
/// fires first.
pub async fn or_cancel<F: Future>(
    future: F,
    token: &CancellationToken,
) -> Result<F::Output, Cancelled> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Cancelled),
        output = future => Ok(output),
    }
}
