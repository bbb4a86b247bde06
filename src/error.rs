//! Error types for codeship-queue
//!
//! Domain-specific error types using thiserror.

use thiserror::Error;

/// Errors talking to the build provider
///
/// Every variant is fatal to a wait: the core never retries, it stops and
/// reports.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or protocol failure before a response arrived
    #[error("Request to '{url}' failed: {error}")]
    Transport { url: String, error: String },

    /// Non-success HTTP status
    #[error("Provider returned HTTP {status} for '{url}': {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode response from '{url}': {error}")]
    Decode { url: String, error: String },

    /// Credentials were rejected
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The authenticated user has no access to the organization
    #[error("Organization '{name}' not found for the authenticated user")]
    UnknownOrganization { name: String },
}

/// Configuration errors raised before the core runs
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value was not supplied by flag, environment or config file
    #[error("{name} required")]
    Missing { name: &'static str },

    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    Read { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: String, error: String },
}
