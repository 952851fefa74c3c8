//! Configuration loading and management
//!
//! A single optional file at `~/.studytrack/config.toml`. Absence is fine;
//! every field has a default.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Username assumed when `--user` is not given
    #[serde(default)]
    pub default_user: Option<String>,

    /// Override for the data directory (defaults to ~/.studytrack)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Get the default data directory path (~/.studytrack/)
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studytrack")
    }

    /// Get the config file path (~/.studytrack/config.toml)
    pub fn config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }

    /// Load the global configuration, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Path of the SQLite database inside the data directory
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("study.db")
    }

    /// Save configuration with file locking and an atomic rename, so a
    /// crashed or concurrent invocation cannot leave a torn file behind.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // Lock file is separate from the config to survive the rename
        let lock_path = path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .context("Failed to acquire config lock")?;

        let temp_path = path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write config content")?;
        temp_file.sync_all().context("Failed to sync config file")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

        // Lock releases when lock_file drops
        Ok(())
    }
}
