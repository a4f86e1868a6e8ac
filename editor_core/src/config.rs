//! Editor settings loaded from TOML.

use crate::error::{EditorError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings that shape new documents, auto-save and history depth.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Base name given to new documents.
    pub untitled_name: String,
    /// Extension given to new documents.
    pub default_extension: String,
    /// Whether auto-save starts out enabled.
    pub auto_save: bool,
    /// Period the host should use for its auto-save timer.
    pub auto_save_interval_secs: u64,
    /// Maximum number of undo snapshots kept. `None` keeps everything.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            untitled_name: "Untitled".to_string(),
            default_extension: "txt".to_string(),
            auto_save: true,
            auto_save_interval_secs: 30,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EditorError::Config(e.to_string()))
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Returns the conventional location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("textpad").join("config.toml"))
    }

    /// Loads the configuration from the default location.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_or_default(&path),
            None => Self::default(),
        }
    }

    /// Loads the configuration at `path`.
    /// A missing file yields defaults; a broken one is logged and ignored.
    pub fn load_from_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::debug!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Returns the auto-save period as a duration.
    pub fn auto_save_interval(&self) -> Duration {
        Duration::from_secs(self.auto_save_interval_secs)
    }
}
