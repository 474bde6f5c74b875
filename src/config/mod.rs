//! Configuration module for sortr
//!
//! Manages user preferences such as the default media root and the filter a
//! session starts with. Configuration is stored in the user's config
//! directory (`~/.config/sortr/config.toml` on Linux).

use crate::filter::MediaFilter;
use crate::media::Category;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SortrConfig {
    /// Media root used when `--root` is not given
    #[serde(default)]
    pub default_root: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Media type filter a session starts with
    #[serde(default)]
    pub media_filter: MediaFilter,

    /// Category filter a session starts with
    #[serde(default)]
    pub start_category: Category,

    /// Jump to the next unsorted item after classifying the current one
    #[serde(default = "default_true")]
    pub advance_to_unsorted: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for SortrConfig {
    fn default() -> Self {
        Self {
            default_root: None,
            quiet: false,
            media_filter: MediaFilter::All,
            start_category: Category::Unsorted,
            advance_to_unsorted: true,
        }
    }
}

impl SortrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("sortr").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Persist a new default root
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path is not a directory or saving fails.
    pub fn set_default_root(&mut self, root: PathBuf) -> Result<(), ConfigError> {
        if !root.is_dir() {
            return Err(ConfigError::Message(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }
        self.default_root = Some(root);
        self.save()
    }

    /// Pick the media root: explicit flag, then config, then the working directory
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the working directory cannot be determined.
    pub fn resolve_root(&self, flag: Option<PathBuf>) -> std::io::Result<PathBuf> {
        match flag.or_else(|| self.default_root.clone()) {
            Some(root) => Ok(root),
            None => std::env::current_dir(),
        }
    }
}
