//! codeship-queue CLI
//!
//! Entry point for the codeship-queue command-line application.

use anyhow::Result;
use clap::Parser;

use codeship_queue::cli::output::display_error;
use codeship_queue::cli::{build_info, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = cli.output();

    // Initialize tracing subscriber; -v/-vv raise the level, RUST_LOG still applies
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output.log_level().into()),
        )
        .init();

    tracing::debug!("{}", build_info());

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
