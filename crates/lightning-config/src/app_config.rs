//! Per-project `.lightning` file

use crate::error::{ConfigError, Result};
use crate::names::get_unique_name;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project config, stored next to the app sources
pub const APP_CONFIG_FILENAME: &str = ".lightning";

/// Configuration metadata of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name; a random one is generated when absent
    #[serde(default = "get_unique_name")]
    pub name: String,

    /// Cluster the application is deployed to
    #[serde(default)]
    pub cluster_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: get_unique_name(),
            cluster_id: None,
        }
    }
}

impl AppConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cluster_id: None,
        }
    }

    pub fn with_cluster_id(mut self, cluster_id: impl Into<String>) -> Self {
        self.cluster_id = Some(cluster_id.into());
        self
    }

    /// Save as YAML to `path`
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved app config to {}", path.display());
        Ok(())
    }

    /// Save as `.lightning` inside `directory`
    pub fn save_to_dir(&self, directory: impl AsRef<Path>) -> Result<()> {
        self.save_to_file(config_file_path(directory)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `.lightning` from `directory`
    pub fn load_from_dir(directory: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_file(directory.as_ref().join(APP_CONFIG_FILENAME))
    }
}

/// Path of the `.lightning` file for a source path
///
/// `source_path` may be a directory or a file inside it.
pub fn config_file_path(source_path: impl AsRef<Path>) -> Result<PathBuf> {
    let source_path = source_path.as_ref();
    let mut dir = if source_path.is_absolute() {
        source_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(source_path)
    };

    if dir.is_file() {
        dir.pop();
    }

    Ok(dir.join(APP_CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new("my-app").with_cluster_id("test-cluster");

        config.save_to_dir(temp_dir.path()).unwrap();
        assert!(temp_dir.path().join(".lightning").exists());

        let loaded = AppConfig::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_file_is_plain_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("app.yaml");

        AppConfig::new("my-app").save_to_file(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("name: my-app"));
        assert!(content.contains("cluster_id: null"));
    }

    #[test]
    fn test_load_without_name_generates_one() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".lightning"), "cluster_id: c-123\n").unwrap();

        let loaded = AppConfig::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(loaded.cluster_id.as_deref(), Some("c-123"));
        assert!(!loaded.name.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        let result = AppConfig::load_from_dir(temp_dir.path());
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".lightning"), "name: [unclosed\n").unwrap();

        let result = AppConfig::load_from_dir(temp_dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_config_file_path_for_file_uses_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = temp_dir.path().join("app.py");
        fs::write(&app, "# app").unwrap();

        assert_eq!(
            config_file_path(&app).unwrap(),
            temp_dir.path().join(".lightning")
        );
        assert_eq!(
            config_file_path(temp_dir.path()).unwrap(),
            temp_dir.path().join(".lightning")
        );
    }

    #[test]
    fn test_default_names_are_generated() {
        let a = AppConfig::default();
        assert!(!a.name.is_empty());
        assert!(a.cluster_id.is_none());
    }
}
