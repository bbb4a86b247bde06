//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod queue;
pub mod wait;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::output::OutputConfig;
use crate::config::Settings;

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Commands {
    /// Wait until every older running build on this branch has finished (default)
    #[default]
    Wait,

    /// Show the running builds on this branch in queue order, without waiting
    Queue,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, settings: &Settings, output: OutputConfig) -> Result<()> {
        match self {
            Self::Wait => wait::execute(settings, output).await,
            Self::Queue => queue::execute(settings, output).await,
        }
    }
}
