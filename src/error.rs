use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("HTTP {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    #[error("Notification error: {0}")]
    Notification(String),
}

impl Error {
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Error::Status {
            status,
            message: message.into(),
        }
    }
}
