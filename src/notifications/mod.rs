//! Notification collaborator used to tell the user a retry is pending.

pub mod messages;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::Notification;

pub use messages::{Language, RATE_LIMIT_TITLE, retry_notification};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<()>;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    async fn notify(&self, notification: Notification) -> Result<()> {
        (**self).notify(notification).await
    }
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        warn!(
            title = %notification.title,
            subtitle = %notification.subtitle,
            "{}",
            notification.message
        );
        Ok(())
    }
}

/// Forwards notifications to a receiver, e.g. a UI task.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        self.tx
            .send(notification)
            .map_err(|_| Error::Notification("notification receiver dropped".to_string()))
    }
}

/// Adapts a plain closure into a [`Notifier`].
pub struct FnNotifier<F>(pub F);

#[async_trait]
impl<F> Notifier for FnNotifier<F>
where
    F: Fn(Notification) -> Result<()> + Send + Sync,
{
    async fn notify(&self, notification: Notification) -> Result<()> {
        (self.0)(notification)
    }
}
