//! Optional configuration file
//!
//! Reads connection defaults from `config.toml`. The file is looked up at
//! `$CODESHIP_QUEUE_CONFIG` when set, otherwise in the platform config
//! directory (`~/.config/codeship-queue/config.toml` on Linux).
//!
//! Values here are the lowest-precedence source: command-line flags and
//! environment variables always win.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::{APP_NAME, ENV_CONFIG_PATH};
use crate::error::ConfigError;

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileConfig {
    /// Provider account settings
    #[serde(default)]
    pub codeship: CodeshipSection,
}

/// `[codeship]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodeshipSection {
    /// Account user name
    pub username: Option<String>,

    /// Account password
    pub password: Option<String>,

    /// Organization name
    pub organization: Option<String>,

    /// Alternative API base URL
    pub api_url: Option<String>,
}

impl FileConfig {
    /// Load from the default location
    ///
    /// Returns defaults when there is no config directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match default_path(env::var(ENV_CONFIG_PATH).ok()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific path
    ///
    /// A missing file yields the default configuration; a file that exists
    /// but is not valid TOML is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        tracing::debug!("Loaded config file {}", path.display());

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }
}

/// Resolve the config file location
///
/// An explicit override (the value of `CODESHIP_QUEUE_CONFIG`) takes
/// precedence over the platform config directory.
pub fn default_path(override_path: Option<String>) -> Option<PathBuf> {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
}
