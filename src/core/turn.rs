//! Turn coordination
//!
//! Ties the pieces together for one invocation: look up the invoking build
//! to learn its branch, collect the branch's running builds, order them and
//! wait on everything ahead.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::defaults::POLL_INTERVAL;
use crate::core::build::Build;
use crate::core::directory::BuildDirectory;
use crate::core::ordering;
use crate::core::queue::build_watch_set;
use crate::core::sequencer::{WaitObserver, WaitOutcome, WaitSequencer};
use crate::error::ApiError;

/// Identifies the invoking build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub project_id: String,
    pub build_id: String,
}

impl TurnRequest {
    pub fn new(project_id: impl Into<String>, build_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            build_id: build_id.into(),
        }
    }
}

/// Ordered view of a branch queue at one point in time
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    /// Branch of the invoking build
    pub branch: String,
    /// Running builds on the branch, oldest allocation first
    pub ordered: Vec<Build>,
    /// Index of the invoking build in `ordered`, if it is running
    pub position: Option<usize>,
}

impl QueueSnapshot {
    /// Builds the invoking build has to wait for
    ///
    /// When the invoking build is not in the queue every listed build is
    /// ahead of it.
    pub fn predecessors(&self) -> &[Build] {
        match self.position {
            Some(pos) => &self.ordered[..pos],
            None => &self.ordered,
        }
    }
}

/// Result of a completed wait
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub snapshot: QueueSnapshot,
    pub outcome: WaitOutcome,
}

/// Read the branch the invoking build runs for
pub async fn build_branch<D>(directory: &D, request: &TurnRequest) -> Result<String, ApiError>
where
    D: BuildDirectory + ?Sized,
{
    let build = directory
        .get_build(&request.project_id, &request.build_id)
        .await?;
    tracing::debug!("Build {} runs on branch '{}'", build.id, build.branch);
    Ok(build.branch)
}

/// Compute the ordered queue for the invoking build's branch
pub async fn queue_position<D>(
    directory: &D,
    request: &TurnRequest,
) -> Result<QueueSnapshot, ApiError>
where
    D: BuildDirectory + ?Sized,
{
    let branch = build_branch(directory, request).await?;
    let watch_set = build_watch_set(directory, &request.project_id, &branch).await?;
    let ordered = ordering::ordered(watch_set);
    let position = ordered.iter().position(|b| b.id == request.build_id);

    Ok(QueueSnapshot {
        branch,
        ordered,
        position,
    })
}

/// Block until every older running build on the branch has finished
pub async fn wait_for_turn<D>(
    directory: &D,
    request: &TurnRequest,
    cancel: &CancellationToken,
    observer: Option<WaitObserver>,
) -> Result<TurnReport, ApiError>
where
    D: BuildDirectory + ?Sized,
{
    wait_for_turn_with_interval(directory, request, cancel, observer, POLL_INTERVAL).await
}

pub(crate) async fn wait_for_turn_with_interval<D>(
    directory: &D,
    request: &TurnRequest,
    cancel: &CancellationToken,
    observer: Option<WaitObserver>,
    interval: Duration,
) -> Result<TurnReport, ApiError>
where
    D: BuildDirectory + ?Sized,
{
    let snapshot = queue_position(directory, request).await?;

    match snapshot.position {
        Some(pos) => tracing::info!(
            "Build {} is #{} of {} on branch '{}'",
            request.build_id,
            pos + 1,
            snapshot.ordered.len(),
            snapshot.branch
        ),
        None => tracing::info!(
            "Build {} is not running on branch '{}'; {} running build(s) ahead",
            request.build_id,
            snapshot.branch,
            snapshot.ordered.len()
        ),
    }

    let mut sequencer = WaitSequencer::with_interval(directory, interval);
    if let Some(observer) = observer {
        sequencer = sequencer.with_observer(observer);
    }

    let outcome = sequencer
        .run(cancel, &snapshot.ordered, &request.build_id)
        .await?;

    Ok(TurnReport { snapshot, outcome })
}
