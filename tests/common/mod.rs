#![allow(dead_code)]

use futures::stream::{self, BoxStream, StreamExt};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use stream_retry::{FnNotifier, Notification, RetryClassify};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Failure raised by the scripted operations below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn too_many_requests() -> Self {
        Self {
            status: Some(429),
            message: "Too Many Requests".to_string(),
        }
    }

    pub fn rate_limit_message() -> Self {
        Self {
            status: None,
            message: "upstream rate limit reached".to_string(),
        }
    }

    pub fn server_error() -> Self {
        Self {
            status: Some(500),
            message: "Internal Server Error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{status}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl RetryClassify for ApiError {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn status_code(&self) -> Option<u16> {
        self.status
    }
}

pub type Attempt = Vec<Result<u32, ApiError>>;

/// Replays one scripted attempt per invocation, repeating the last one once
/// the script runs out.
#[derive(Clone)]
pub struct ScriptedOp {
    script: Arc<Vec<Attempt>>,
    calls: Arc<AtomicU32>,
}

impl ScriptedOp {
    pub fn new(script: Vec<Attempt>) -> Self {
        assert!(!script.is_empty());
        Self {
            script: Arc::new(script),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn always(attempt: Attempt) -> Self {
        Self::new(vec![attempt])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn invoke(&self) -> BoxStream<'static, Result<u32, ApiError>> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        let attempt = self.script[index.min(self.script.len() - 1)].clone();
        stream::iter(attempt).boxed()
    }
}

/// Collects every notification it is handed.
#[derive(Clone, Default)]
pub struct Recorded(pub Arc<Mutex<Vec<Notification>>>);

impl Recorded {
    pub fn notifier(
        &self,
    ) -> FnNotifier<impl Fn(Notification) -> stream_retry::Result<()> + Send + Sync + 'static>
    {
        let seen = Arc::clone(&self.0);
        FnNotifier(move |notification: Notification| -> stream_retry::Result<()> {
            seen.lock().unwrap().push(notification);
            Ok(())
        })
    }

    pub fn all(&self) -> Vec<Notification> {
        self.0.lock().unwrap().clone()
    }
}
