//! Watch-set construction
//!
//! Collects the running builds of one branch from the provider's paginated
//! build listing.

use crate::config::defaults::PAGE_SIZE;
use crate::core::build::Build;
use crate::core::directory::BuildDirectory;
use crate::error::ApiError;

/// Collect every running build of `project_id` on `branch`
///
/// Builds are returned in provider order; the caller orders them. The
/// invoking build is included when it is still running.
///
/// # Precondition
///
/// The provider lists builds newest first. Scanning stops at the first page
/// that holds no running build at all (of any branch), on the assumption
/// that older pages cannot hold one either. It also stops at the last page
/// or when no next page is advertised.
///
/// Any listing error aborts the scan; no partial result is returned.
pub async fn build_watch_set<D>(
    directory: &D,
    project_id: &str,
    branch: &str,
) -> Result<Vec<Build>, ApiError>
where
    D: BuildDirectory + ?Sized,
{
    let mut watch_set = Vec::new();
    let mut page_number = 1;

    loop {
        tracing::debug!("Listing builds of project {project_id}, page {page_number}");
        let page = directory
            .list_builds(project_id, page_number, PAGE_SIZE)
            .await?;

        let mut page_has_running = false;
        for build in page.builds {
            if !build.is_running() {
                continue;
            }
            page_has_running = true;
            if build.branch == branch {
                watch_set.push(build);
            }
        }

        if page.is_last_page || !page.has_next {
            break;
        }

        if !page_has_running {
            tracing::debug!("Page {page_number} has no running builds, stopping scan");
            break;
        }

        page_number = page.next_page.unwrap_or(page_number + 1);
    }

    tracing::info!(
        "Found {} running build(s) on branch '{branch}'",
        watch_set.len()
    );

    Ok(watch_set)
}
