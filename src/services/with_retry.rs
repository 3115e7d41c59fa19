//! Restart-from-scratch retry for streaming operations.
//!
//! A wrapped operation is re-run from its beginning whenever it fails with a
//! retryable error and attempts remain. Elements already forwarded from a
//! failed attempt are not retracted, so callers can observe a repeated prefix.

use async_stream::stream;
use futures::stream::{BoxStream, Stream, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::config::SettingsProvider;
use crate::models::RetryPolicy;
use crate::notifications::{LogNotifier, Notifier, retry_notification};
use crate::utils::cancel::or_cancel;
use crate::utils::retry::RetryClassify;
use crate::utils::time::sleep_or_cancel;

#[derive(Clone)]
pub struct WithRetry {
    settings: Arc<dyn SettingsProvider>,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationToken,
}

impl WithRetry {
    pub fn new(settings: impl SettingsProvider + 'static) -> Self {
        Self {
            settings: Arc::new(settings),
            notifier: Arc::new(LogNotifier),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Ends every stream produced by this wrapper once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Policy the next invocation would run with.
    pub fn current_policy(&self) -> RetryPolicy {
        self.settings.retry_options().resolve()
    }

    /// Wraps `op` into an operation with the same argument type whose
    /// streams retry. `args` are cloned for every attempt.
    pub fn wrap<A, F, S, T, E>(
        &self,
        op: F,
    ) -> impl Fn(A) -> BoxStream<'static, Result<T, E>> + Send + Sync + use<A, F, S, T, E>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A) -> S + Send + Sync + 'static,
        S: Stream<Item = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: RetryClassify + std::fmt::Display + Send + 'static,
    {
        let wrapper = self.clone();
        let op = Arc::new(op);
        move |args: A| {
            let op = Arc::clone(&op);
            wrapper.run(move || (*op)(args.clone())).boxed()
        }
    }

    /// Runs `op` with retries. The policy is resolved once, when the
    /// returned stream is first polled.
    pub fn run<F, S, T, E>(
        &self,
        mut op: F,
    ) -> impl Stream<Item = Result<T, E>> + Send + 'static + use<F, S, T, E>
    where
        F: FnMut() -> S + Send + 'static,
        S: Stream<Item = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: RetryClassify + std::fmt::Display + Send + 'static,
    {
        let settings = Arc::clone(&self.settings);
        let notifier = Arc::clone(&self.notifier);
        let cancel = self.cancel.clone();

        stream! {
            let policy = settings.retry_options().resolve();
            let mut attempt: u32 = 0;

            while !cancel.is_cancelled() {
                debug!(
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    "Starting attempt"
                );

                let mut attempt_stream = Box::pin(op());
                let failure = loop {
                    match or_cancel(attempt_stream.next(), &cancel).await {
                        Ok(Some(Ok(item))) => yield Ok(item),
                        Ok(Some(Err(e))) => break Some(e),
                        Ok(None) => break None,
                        Err(_) => {
                            debug!(attempt = attempt + 1, "Cancelled while streaming");
                            return;
                        }
                    }
                };
                drop(attempt_stream);

                let Some(err) = failure else {
                    debug!(attempt = attempt + 1, "Attempt completed");
                    return;
                };

                let classification = policy.classify(&err);
                if !classification.retryable || policy.is_last_attempt(attempt) {
                    error!(
                        error = %err,
                        attempt = attempt + 1,
                        max_retries = policy.max_retries,
                        rate_limited = classification.rate_limited,
                        retryable = classification.retryable,
                        "Giving up"
                    );
                    yield Err(err);
                    return;
                }

                let delay = policy.delay_for(attempt);
                warn!(
                    error = %err,
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    rate_limited = classification.rate_limited,
                    "Attempt failed, retrying"
                );

                if policy.show_notification {
                    let notification =
                        retry_notification(policy.language, attempt, policy.max_retries, delay);
                    match or_cancel(notifier.notify(notification), &cancel).await {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => warn!(error = %e, "Failed to show retry notification"),
                        Err(_) => return,
                    }
                }

                if !sleep_or_cancel(delay, &cancel).await {
                    debug!(attempt = attempt + 1, "Cancelled during backoff");
                    return;
                }

                attempt += 1;
            }
        }
    }
}

impl Default for WithRetry {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}
