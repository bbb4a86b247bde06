//! Resolved connection settings
//!
//! Flags and environment variables arrive together through clap (each flag
//! has an `env` fallback); the config file fills whatever is still unset.

use std::fmt;

use crate::config::file::FileConfig;
use crate::config::urls;
use crate::error::ConfigError;

/// Values supplied on the command line or via environment
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub organization: Option<String>,
    pub project_id: Option<String>,
    pub build_id: Option<String>,
    pub api_url: Option<String>,
}

/// Everything needed to talk to the provider and identify the invoking build
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub username: String,
    pub password: String,
    pub organization: String,
    pub project_id: String,
    pub build_id: String,
    pub api_url: String,
}

impl Settings {
    /// Merge input with the config file and check required values
    ///
    /// Required values are checked in a fixed order (username, password,
    /// organization, project id, build id) and the first missing one is
    /// reported by its environment variable name.
    pub fn resolve(input: SettingsInput, file: &FileConfig) -> Result<Self, ConfigError> {
        let section = &file.codeship;

        let username = require(
            present(input.username).or_else(|| section.username.clone()),
            "CODESHIP_USERNAME",
        )?;
        let password = require(
            present(input.password).or_else(|| section.password.clone()),
            "CODESHIP_PASSWORD",
        )?;
        let organization = require(
            present(input.organization).or_else(|| section.organization.clone()),
            "CODESHIP_ORGANIZATION",
        )?;
        let project_id = require(input.project_id, "CI_PROJECT_ID")?;
        let build_id = require(input.build_id, "CI_BUILD_ID")?;

        let api_url = present(input.api_url)
            .or_else(|| section.api_url.clone())
            .unwrap_or_else(|| urls::CODESHIP_API.to_string());

        Ok(Self {
            username,
            password,
            organization,
            project_id,
            build_id,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("organization", &self.organization)
            .field("project_id", &self.project_id)
            .field("build_id", &self.build_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// An empty flag or exported-but-empty variable counts as unset
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn require(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    present(value).ok_or(ConfigError::Missing { name })
}
