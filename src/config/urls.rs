//! Provider URLs

/// Codeship API v2 base URL
pub const CODESHIP_API: &str = "https://api.codeship.com/v2";
