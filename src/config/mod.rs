//! Configuration and constants
//!
//! - [`defaults`] - Fixed timing and paging values
//! - [`urls`] - Provider endpoints
//! - [`file`] - Optional TOML config file
//! - [`settings`] - Resolved connection settings (flags > env > file)

pub mod defaults;
pub mod file;
pub mod settings;
pub mod urls;

pub use file::FileConfig;
pub use settings::Settings;
