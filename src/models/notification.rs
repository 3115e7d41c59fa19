use serde::{Deserialize, Serialize};

/// User-facing notice handed to a [`crate::notifications::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub subtitle: String,
    pub message: String,
}
