//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no queue logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;
pub mod shutdown;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use crate::config::settings::SettingsInput;
use crate::config::{FileConfig, Settings};
use commands::Commands;
use output::OutputConfig;

/// codeship-queue - run one Codeship build per branch at a time
///
/// Run from inside a build: waits until every older running build on the
/// same branch has finished, then returns so the build can continue.
#[derive(Parser, Debug)]
#[command(name = "codeship-queue")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to $CODESHIP_QUEUE_CONFIG or the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Provider credentials and build identity
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Codeship user name
    #[arg(long, env = "CODESHIP_USERNAME", global = true)]
    pub username: Option<String>,

    /// Codeship password
    #[arg(long, env = "CODESHIP_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Codeship organization name
    #[arg(long, env = "CODESHIP_ORGANIZATION", global = true)]
    pub organization: Option<String>,

    /// Project UUID of the invoking build
    #[arg(long, env = "CI_PROJECT_ID", global = true)]
    pub project_id: Option<String>,

    /// UUID of the invoking build
    #[arg(long, env = "CI_BUILD_ID", global = true)]
    pub build_id: Option<String>,

    /// Alternative API base URL
    #[arg(long, env = "CODESHIP_API_URL", global = true, hide = true)]
    pub api_url: Option<String>,
}

impl From<ConnectionArgs> for SettingsInput {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            username: args.username,
            password: args.password,
            organization: args.organization,
            project_id: args.project_id,
            build_id: args.build_id,
            api_url: args.api_url,
        }
    }
}

impl Cli {
    /// Output preferences from the global flags
    pub fn output(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.verbose)
    }

    /// Execute the CLI command
    ///
    /// Without a subcommand the tool waits, which is what a build step wants.
    pub async fn run(self) -> Result<()> {
        let output = self.output();

        let file = match &self.config {
            Some(path) => FileConfig::load_from_path(path)?,
            None => FileConfig::load()?,
        };
        let settings = Settings::resolve(self.connection.into(), &file)
            .context("Missing required configuration")?;
        tracing::debug!("Resolved settings: {settings:?}");

        self.command.unwrap_or_default().run(&settings, output).await
    }
}

/// One-line description of the running binary
pub fn build_info() -> String {
    format!(
        "codeship-queue {} ({}) built {} for {}",
        crate::provider::VERSION,
        crate::provider::git_revision(),
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
    )
}
