//! Build snapshots
//!
//! A [`Build`] is a read-only snapshot of provider state. The core never
//! mutates one; it fetches a fresh snapshot whenever it needs current state.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Provider-reported build state
///
/// Only [`BuildStatus::Testing`] counts as running. Anything the provider
/// adds later decodes as [`BuildStatus::Unknown`] and is treated as not
/// running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Initiated,
    Waiting,
    Testing,
    Success,
    Error,
    Stopped,
    Ignored,
    Blocked,
    InfrastructureFailure,
    #[serde(other)]
    Unknown,
}

impl BuildStatus {
    /// Whether the build currently occupies the branch
    pub fn is_running(self) -> bool {
        matches!(self, Self::Testing)
    }

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::Waiting => "waiting",
            Self::Testing => "testing",
            Self::Success => "success",
            Self::Error => "error",
            Self::Stopped => "stopped",
            Self::Ignored => "ignored",
            Self::Blocked => "blocked",
            Self::InfrastructureFailure => "infrastructure_failure",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Build {
    /// Build identifier, unique within the provider
    #[serde(rename = "uuid")]
    pub id: String,

    /// Owning project
    #[serde(rename = "project_uuid")]
    pub project_id: String,

    /// Branch the build runs for
    #[serde(default)]
    pub branch: String,

    /// Current state
    pub status: BuildStatus,

    /// When the build was scheduled to run; `None` orders first
    #[serde(default)]
    pub allocated_at: Option<DateTime<Utc>>,

    /// When the build entered the provider queue
    #[serde(default)]
    pub queued_at: Option<DateTime<Utc>>,

    /// When the build finished, if it has
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,

    /// Git ref (e.g. `heads/main`)
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,

    /// Commit under test
    #[serde(default)]
    pub commit_sha: Option<String>,

    /// User that triggered the build
    #[serde(default)]
    pub username: Option<String>,
}

impl Build {
    /// Minimal snapshot, mostly useful for tests and doubles
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        branch: impl Into<String>,
        status: BuildStatus,
        allocated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            branch: branch.into(),
            status,
            allocated_at,
            queued_at: None,
            finished_at: None,
            git_ref: None,
            commit_sha: None,
            username: None,
        }
    }

    /// Whether the build currently occupies the branch
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }
}
