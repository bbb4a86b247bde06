//! CLI implementation for `codeship-queue queue`
//!
//! Prints the branch queue as the wait command would see it.

use anyhow::{Context, Result};

use crate::cli::output::{status, OutputConfig};
use crate::config::Settings;
use crate::core::turn::{self, QueueSnapshot, TurnRequest};
use crate::provider::CodeshipClient;

/// Execute the queue command
pub async fn execute(settings: &Settings, output: OutputConfig) -> Result<()> {
    let client = CodeshipClient::new(settings).context("Failed to create Codeship client")?;
    let request = TurnRequest::new(&settings.project_id, &settings.build_id);

    let spinner = output.spinner("Fetching running builds...");
    let snapshot = turn::queue_position(&client, &request).await;
    spinner.finish_and_clear();
    let snapshot = snapshot.context("Failed to read the branch queue")?;

    for line in render(&snapshot, &request.build_id) {
        println!("{line}");
    }

    Ok(())
}

/// Format a snapshot, one line per entry plus a summary
pub fn render(snapshot: &QueueSnapshot, self_id: &str) -> Vec<String> {
    let mut lines = vec![format!("Branch: {}", snapshot.branch)];

    if snapshot.ordered.is_empty() {
        lines.push(format!("{} No running builds", status::INFO));
    }

    for (i, build) in snapshot.ordered.iter().enumerate() {
        let allocated = build
            .allocated_at
            .map_or_else(|| "not allocated".to_string(), |t| t.to_rfc3339());
        let marker = if build.id == self_id { "  <- this build" } else { "" };
        lines.push(format!(
            "  {}. {}  {}  {}{marker}",
            i + 1,
            build.id,
            allocated,
            build.username.as_deref().unwrap_or("-"),
        ));
    }

    let ahead = snapshot.predecessors().len();
    match snapshot.position {
        Some(pos) => lines.push(format!(
            "Position {} of {} ({ahead} build(s) ahead)",
            pos + 1,
            snapshot.ordered.len()
        )),
        None => lines.push(format!(
            "{} Build {self_id} is not running; {ahead} running build(s) on this branch",
            status::WARNING
        )),
    }

    lines
}
