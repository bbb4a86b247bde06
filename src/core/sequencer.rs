//! Wait sequencing
//!
//! Walks an ordered watch set and blocks on each build ahead of the invoking
//! one until the provider reports it no longer running. Predecessors are
//! awaited one at a time, in queue order.
//!
//! Cancellation is cooperative. The token is checked before every status
//! query and raced against the poll timer; an in-flight query is never
//! interrupted. A cancelled wait is a successful outcome, not an error.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::build::Build;
use crate::core::directory::BuildDirectory;
use crate::error::ApiError;

/// Progress notification emitted while waiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitEvent {
    /// A predecessor is still running; the sequencer sleeps one interval
    Waiting { build_id: String, attempt: u32 },
    /// A predecessor is no longer running
    Cleared { build_id: String },
}

/// Observer callback for [`WaitEvent`]s
pub type WaitObserver = Box<dyn Fn(&WaitEvent) + Send + Sync>;

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Reached the invoking build: every older build has finished
    Turn,
    /// Cancelled by the operator
    Cancelled,
    /// Waited out every listed build without meeting the invoking build
    QueueDrained,
}

impl WaitOutcome {
    /// Whether the invoking build may proceed
    pub fn may_proceed(self) -> bool {
        matches!(self, Self::Turn | Self::QueueDrained)
    }
}

/// Sequential poller over an ordered watch set
pub struct WaitSequencer<'a, D: ?Sized> {
    directory: &'a D,
    interval: Duration,
    observer: Option<WaitObserver>,
}

impl<'a, D> WaitSequencer<'a, D>
where
    D: BuildDirectory + ?Sized,
{
    /// Create a sequencer polling every `interval`
    pub fn with_interval(directory: &'a D, interval: Duration) -> Self {
        Self {
            directory,
            interval,
            observer: None,
        }
    }

    /// Attach a progress observer
    #[must_use]
    pub fn with_observer(mut self, observer: WaitObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Wait for every build ordered before `self_id` to stop running
    ///
    /// Entries after `self_id` are never queried. The first query error is
    /// returned unchanged and ends the wait. A token cancelled before the scan
    /// reaches `self_id` always yields [`WaitOutcome::Cancelled`].
    pub async fn run(
        &self,
        cancel: &CancellationToken,
        ordered: &[Build],
        self_id: &str,
    ) -> Result<WaitOutcome, ApiError> {
        for build in ordered {
            if cancel.is_cancelled() {
                tracing::info!("Wait cancelled before reaching build {self_id}");
                return Ok(WaitOutcome::Cancelled);
            }

            if build.id == self_id {
                tracing::info!("Reached build {self_id} in queue");
                return Ok(WaitOutcome::Turn);
            }

            if self.wait_for(cancel, build).await? == Poll::Cancelled {
                tracing::info!("Wait cancelled while waiting on build {}", build.id);
                return Ok(WaitOutcome::Cancelled);
            }
        }

        if cancel.is_cancelled() {
            return Ok(WaitOutcome::Cancelled);
        }

        tracing::info!("Build {self_id} not found among running builds, queue drained");
        Ok(WaitOutcome::QueueDrained)
    }

    async fn wait_for(&self, cancel: &CancellationToken, build: &Build) -> Result<Poll, ApiError> {
        let mut attempt = 0;

        loop {
            if cancel.is_cancelled() {
                return Ok(Poll::Cancelled);
            }

            let current = self
                .directory
                .get_build(&build.project_id, &build.id)
                .await?;

            if !current.is_running() {
                tracing::debug!("Build {} is {}", build.id, current.status);
                self.notify(&WaitEvent::Cleared {
                    build_id: build.id.clone(),
                });
                return Ok(Poll::Finished);
            }

            attempt += 1;
            tracing::info!("Waiting on build {} (check {attempt})", build.id);
            self.notify(&WaitEvent::Waiting {
                build_id: build.id.clone(),
                attempt,
            });

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(Poll::Cancelled),
                () = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    fn notify(&self, event: &WaitEvent) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Poll {
    Finished,
    Cancelled,
}
