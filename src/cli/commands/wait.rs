//! CLI implementation for `codeship-queue wait`
//!
//! Blocks until the invoking build is first in its branch queue.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::cli::output::{status, OutputConfig};
use crate::cli::shutdown;
use crate::config::Settings;
use crate::core::sequencer::{WaitEvent, WaitObserver, WaitOutcome};
use crate::core::turn::{self, TurnRequest};
use crate::provider::CodeshipClient;

/// Execute the wait command
pub async fn execute(settings: &Settings, output: OutputConfig) -> Result<()> {
    let client = CodeshipClient::new(settings).context("Failed to create Codeship client")?;
    tracing::debug!("Using Codeship API at {}", client.base_url());

    let cancel = CancellationToken::new();
    shutdown::cancel_on_signal(&cancel).context("Failed to install signal handlers")?;

    let request = TurnRequest::new(&settings.project_id, &settings.build_id);
    let report = turn::wait_for_turn(&client, &request, &cancel, Some(observer(output)))
        .await
        .with_context(|| format!("Failed to wait for earlier builds of {}", request.build_id))?;

    match report.outcome {
        WaitOutcome::Turn | WaitOutcome::QueueDrained => {
            output.line(format!("{} Resuming build", status::SUCCESS));
        }
        WaitOutcome::Cancelled => {
            output.line(format!("{} Wait cancelled", status::WARNING));
        }
    }

    Ok(())
}

fn observer(output: OutputConfig) -> WaitObserver {
    Box::new(move |event| match event {
        WaitEvent::Waiting { build_id, .. } => {
            output.line(format!("Waiting on build {build_id}"));
        }
        WaitEvent::Cleared { build_id } => {
            tracing::info!("Build {build_id} finished");
        }
    })
}
