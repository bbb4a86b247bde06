//! Output formatting and progress indicators
//!
//! User-facing progress lines go to stdout; logs and errors go to stderr.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

/// Output preferences derived from global flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress progress lines
    pub quiet: bool,
    /// Verbosity count (-v, -vv)
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Log level implied by the verbosity flags
    pub fn log_level(self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Print a progress line unless quiet
    pub fn line(self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    /// Spinner for fetches of unknown duration, hidden when quiet
    pub fn spinner(self, message: &str) -> ProgressBar {
        if self.quiet {
            ProgressBar::hidden()
        } else {
            create_spinner(message)
        }
    }
}

/// Create a spinner for operations with unknown duration
///
/// Draws to stderr and stays invisible when stderr is not a terminal, which
/// keeps CI logs clean.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
