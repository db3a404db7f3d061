use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("path does not exist: {0:?}")]
    Missing(PathBuf),

    #[error("an absolute path must be provided: {0:?}")]
    NotAbsolute(PathBuf),

    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("not a regular file: {0:?}")]
    NotAFile(PathBuf),
}

/// GesturePad's runtime settings, stored as `data/config.json` under the
/// project root. Keys this tool does not manage are preserved on rewrite.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediapipe_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<PathBuf>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join("data").join("config.json")
}

impl Config {
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_config_path(project_root);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file at {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {:?}", path))
    }

    pub fn save(&self, project_root: &Path) -> Result<()> {
        let path = project_config_path(project_root);
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file at {:?}", path))
    }

    /// Records the MediaPipe installation directory. The path must exist, be
    /// absolute, and be a directory.
    pub fn set_mediapipe_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Err(ConfigError::Missing(dir.to_path_buf()));
        }
        if !dir.is_absolute() {
            return Err(ConfigError::NotAbsolute(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(ConfigError::NotADirectory(dir.to_path_buf()));
        }
        self.mediapipe_dir = Some(dir.to_path_buf());
        Ok(())
    }

    /// Records the Google Cloud Platform credentials file. The path must
    /// exist, be absolute, and be a regular file.
    pub fn set_credentials_path(&mut self, file: &Path) -> Result<(), ConfigError> {
        if !file.exists() {
            return Err(ConfigError::Missing(file.to_path_buf()));
        }
        if !file.is_absolute() {
            return Err(ConfigError::NotAbsolute(file.to_path_buf()));
        }
        if !file.is_file() {
            return Err(ConfigError::NotAFile(file.to_path_buf()));
        }
        self.credentials = Some(file.to_path_buf());
        Ok(())
    }
}
