//! Test utilities
//!
//! Proptest generators and an in-memory [`BuildDirectory`] double that
//! records every call made against it.

#[cfg(test)]
pub mod generators {
    use crate::core::build::{Build, BuildStatus};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use std::ops::Range;

    /// Allocation times from a narrow window so ties are common
    pub fn allocated_at() -> impl Strategy<Value = Option<DateTime<Utc>>> {
        prop_oneof![
            1 => Just(None),
            6 => (0i64..8).prop_map(|minute| {
                Utc.timestamp_opt(1_700_000_000 + minute * 60, 0).single()
            }),
        ]
    }

    /// A running watch set with unique identifiers
    pub fn watch_set(size: Range<usize>) -> impl Strategy<Value = Vec<Build>> {
        proptest::collection::vec(allocated_at(), size).prop_map(|times| {
            times
                .into_iter()
                .enumerate()
                .map(|(i, at)| {
                    Build::new(
                        format!("build-{i}"),
                        "project",
                        "main",
                        BuildStatus::Testing,
                        at,
                    )
                })
                .collect()
        })
    }
}

#[cfg(test)]
pub mod fakes {
    use std::collections::{HashMap, HashSet, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio_util::sync::CancellationToken;

    use crate::core::build::{Build, BuildStatus};
    use crate::core::directory::{BuildDirectory, BuildPage};
    use crate::error::ApiError;

    /// A call made against [`FakeDirectory`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        List { page: u32, per_page: u32 },
        Get { build_id: String },
    }

    /// Scripted in-memory build directory
    ///
    /// `get_build` answers from a per-build script of statuses; each call
    /// consumes one entry and the last entry repeats forever.
    #[derive(Debug, Default)]
    pub struct FakeDirectory {
        pages: HashMap<u32, BuildPage>,
        builds: HashMap<String, Build>,
        scripts: Mutex<HashMap<String, VecDeque<BuildStatus>>>,
        failing_pages: HashSet<u32>,
        failing_builds: HashSet<String>,
        cancel_on_get: Option<(String, CancellationToken)>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `page` for list requests with that page number
        pub fn with_page(mut self, number: u32, page: BuildPage) -> Self {
            for build in &page.builds {
                self.builds
                    .entry(build.id.clone())
                    .or_insert_with(|| build.clone());
            }
            self.pages.insert(number, page);
            self
        }

        /// Register a build for point lookups
        pub fn with_build(mut self, build: Build) -> Self {
            self.builds.insert(build.id.clone(), build);
            self
        }

        /// Script the statuses `get_build` reports for a build
        pub fn with_statuses(self, build_id: &str, statuses: &[BuildStatus]) -> Self {
            self.scripts
                .lock()
                .unwrap()
                .insert(build_id.to_string(), statuses.iter().copied().collect());
            self
        }

        /// Fail list requests for a page
        pub fn failing_page(mut self, number: u32) -> Self {
            self.failing_pages.insert(number);
            self
        }

        /// Fail point lookups for a build
        pub fn failing_build(mut self, build_id: &str) -> Self {
            self.failing_builds.insert(build_id.to_string());
            self
        }

        /// Cancel `token` whenever `build_id` is looked up
        pub fn cancel_on_get(mut self, build_id: &str, token: CancellationToken) -> Self {
            self.cancel_on_get = Some((build_id.to_string(), token));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// Identifiers passed to `get_build`, in call order
        pub fn get_calls(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Get { build_id } => Some(build_id),
                    Call::List { .. } => None,
                })
                .collect()
        }

        /// Page numbers passed to `list_builds`, in call order
        pub fn list_calls(&self) -> Vec<u32> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::List { page, .. } => Some(page),
                    Call::Get { .. } => None,
                })
                .collect()
        }

        fn next_status(&self, build_id: &str) -> Option<BuildStatus> {
            let mut scripts = self.scripts.lock().unwrap();
            let script = scripts.get_mut(build_id)?;
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().copied()
            }
        }
    }

    #[async_trait]
    impl BuildDirectory for FakeDirectory {
        async fn list_builds(
            &self,
            project_id: &str,
            page: u32,
            per_page: u32,
        ) -> Result<BuildPage, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::List { page, per_page });

            if self.failing_pages.contains(&page) {
                return Err(ApiError::Status {
                    url: format!("fake://projects/{project_id}/builds?page={page}"),
                    status: 500,
                    message: "list failed".to_string(),
                });
            }

            Ok(self.pages.get(&page).cloned().unwrap_or(BuildPage {
                is_last_page: true,
                ..BuildPage::default()
            }))
        }

        async fn get_build(&self, project_id: &str, build_id: &str) -> Result<Build, ApiError> {
            self.calls.lock().unwrap().push(Call::Get {
                build_id: build_id.to_string(),
            });

            if let Some((id, token)) = &self.cancel_on_get {
                if id == build_id {
                    token.cancel();
                }
            }

            if self.failing_builds.contains(build_id) {
                return Err(ApiError::Status {
                    url: format!("fake://projects/{project_id}/builds/{build_id}"),
                    status: 503,
                    message: "lookup failed".to_string(),
                });
            }

            let mut build = self
                .builds
                .get(build_id)
                .cloned()
                .unwrap_or_else(|| {
                    Build::new(build_id, project_id, "", BuildStatus::Success, None)
                });
            if let Some(status) = self.next_status(build_id) {
                build.status = status;
            }
            Ok(build)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::generators::*;
    use crate::core::build::BuildStatus;
    use crate::core::directory::BuildDirectory;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_fake_directory_replays_script() {
        let directory = FakeDirectory::new().with_statuses(
            "b1",
            &[BuildStatus::Testing, BuildStatus::Success],
        );

        let first = directory.get_build("p", "b1").await.unwrap();
        let second = directory.get_build("p", "b1").await.unwrap();
        let third = directory.get_build("p", "b1").await.unwrap();

        assert_eq!(first.status, BuildStatus::Testing);
        assert_eq!(second.status, BuildStatus::Success);
        assert_eq!(third.status, BuildStatus::Success);
        assert_eq!(directory.get_calls(), vec!["b1", "b1", "b1"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_watch_set_generator(builds in watch_set(0..20)) {
            let mut ids: Vec<_> = builds.iter().map(|b| b.id.clone()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), builds.len());
            prop_assert!(builds.iter().all(|b| b.is_running()));
        }
    }
}
