//! Build directory abstraction
//!
//! The core reads provider state only through [`BuildDirectory`]. The real
//! implementation lives in [`crate::provider`]; tests substitute in-memory
//! doubles.

use async_trait::async_trait;

use crate::core::build::Build;
use crate::error::ApiError;

/// One page of a build listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPage {
    /// Builds on this page, in provider order
    pub builds: Vec<Build>,
    /// Whether the provider advertised a following page
    pub has_next: bool,
    /// Whether the provider marked this page as the last one
    pub is_last_page: bool,
    /// Page number to request next, when known
    pub next_page: Option<u32>,
}

/// Read access to the provider's builds
#[async_trait]
pub trait BuildDirectory: Send + Sync {
    /// List builds of a project, one page at a time (pages start at 1)
    async fn list_builds(
        &self,
        project_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<BuildPage, ApiError>;

    /// Fetch the current snapshot of one build
    async fn get_build(&self, project_id: &str, build_id: &str) -> Result<Build, ApiError>;
}

