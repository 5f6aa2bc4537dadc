pub mod app_config;
pub mod error;
pub mod names;
pub mod settings;

pub use app_config::{APP_CONFIG_FILENAME, AppConfig, config_file_path};
pub use error::*;
pub use names::get_unique_name;
pub use settings::Settings;

use std::path::PathBuf;

/// Lightning config directory, created on first use
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("lightning");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Cluster id recorded in the `.lightning` file of `directory`, if any
pub fn default_cluster_id(directory: impl AsRef<std::path::Path>) -> Option<String> {
    match AppConfig::load_from_dir(directory) {
        Ok(config) => config.cluster_id,
        Err(e) => {
            tracing::debug!("No default cluster id: {}", e);
            None
        }
    }
}
