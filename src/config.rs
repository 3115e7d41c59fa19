mod provider;
mod settings;

pub use provider::{ConfigSettings, FnSettings, SettingsProvider};
pub use settings::{DEFAULT_CONFIG_PATH, ENV_PREFIX, Settings};
