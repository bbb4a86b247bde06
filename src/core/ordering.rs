//! Queue ordering
//!
//! Builds run oldest-allocated first. The sort is stable, so builds with
//! equal allocation times (or none at all) keep the order they were fetched
//! in, and every process watching the same branch derives the same queue.

use crate::core::build::Build;

/// Sort builds ascending by allocation time, in place
///
/// Builds without an allocation time sort before all others.
pub fn sort_by_allocation(builds: &mut [Build]) {
    builds.sort_by_key(|b| b.allocated_at);
}

/// Owned variant of [`sort_by_allocation`]
pub fn ordered(mut builds: Vec<Build>) -> Vec<Build> {
    sort_by_allocation(&mut builds);
    builds
}
