//! Default configuration values

use std::time::Duration;

/// Interval between status polls of a predecessor build
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Number of builds requested per page when listing
pub const PAGE_SIZE: u32 = 50;

/// Re-authenticate when the access token expires within this many seconds
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Whole-request timeout for provider calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection timeout for provider calls
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable pointing at an alternative config file
pub const ENV_CONFIG_PATH: &str = "CODESHIP_QUEUE_CONFIG";

/// Application name used in directory paths
pub const APP_NAME: &str = "codeship-queue";
