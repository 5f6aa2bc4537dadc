//! User settings: control plane endpoint, credentials and wait timing
//!
//! Read from `~/.config/lightning/settings.yaml` when present, then
//! overridden by `LIGHTNING_*` environment variables.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const SETTINGS_FILENAME: &str = "settings.yaml";

pub const DEFAULT_CLOUD_URL: &str = "https://lightning.ai";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 5400;

pub const ENV_CLOUD_URL: &str = "LIGHTNING_CLOUD_URL";
pub const ENV_USER_ID: &str = "LIGHTNING_USER_ID";
pub const ENV_API_KEY: &str = "LIGHTNING_API_KEY";
pub const ENV_POLL_INTERVAL: &str = "LIGHTNING_POLL_INTERVAL";
pub const ENV_WAIT_TIMEOUT: &str = "LIGHTNING_CLUSTER_WAIT_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the control plane
    pub cloud_url: String,
    pub user_id: Option<String>,
    pub api_key: Option<String>,
    pub poll_interval_secs: u64,
    pub wait_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cloud_url: DEFAULT_CLOUD_URL.to_string(),
            user_id: None,
            api_key: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load the user settings file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = crate::get_config_dir()?.join(SETTINGS_FILENAME);
        let mut settings = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Self::default()
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        settings.validate("poll_interval_secs")?;
        Ok(settings)
    }

    /// Reject a zero poll interval
    fn validate(&self, poll_interval_key: &str) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: poll_interval_key.to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Override fields from `LIGHTNING_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(ENV_CLOUD_URL) {
            self.cloud_url = url;
        }
        if let Ok(user_id) = std::env::var(ENV_USER_ID) {
            self.user_id = Some(user_id);
        }
        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(secs) = env_secs(ENV_POLL_INTERVAL)? {
            self.poll_interval_secs = secs;
            self.validate(ENV_POLL_INTERVAL)?;
        }
        if let Some(secs) = env_secs(ENV_WAIT_TIMEOUT)? {
            self.wait_timeout_secs = secs;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

fn env_secs(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
