use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::models::RetryOptions;

pub const DEFAULT_CONFIG_PATH: &str = "config/default";
pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub retry: RetryOptions,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_PATH, ENV_PREFIX)
    }

    pub fn from_path(path: &str) -> Result<Self> {
        Self::load(path, ENV_PREFIX)
    }

    /// Layers an optional config file under `<prefix>__RETRY__*` variables.
    pub fn load(path: &str, env_prefix: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;

        debug!(
            path = path,
            retry = ?settings.retry,
            "Loaded retry settings"
        );

        Ok(settings)
    }
}
