//! Codeship provider
//!
//! HTTP implementation of [`crate::core::BuildDirectory`] against the
//! Codeship v2 API.

pub mod client;
pub mod links;

pub use client::CodeshipClient;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git revision the binary was built from, when the build script found one
pub fn git_revision() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}

/// `User-Agent` sent with every provider request
pub fn user_agent() -> String {
    format!("codeship-queue/{VERSION} ({})", git_revision())
}
