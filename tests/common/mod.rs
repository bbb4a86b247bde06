//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a sandboxed
//! environment for running the binary and a mocked Codeship API.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Output, Stdio};

use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::process::{Child, Command};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ORG_UUID: &str = "org-uuid";
pub const PROJECT: &str = "my-project-uuid";
pub const BRANCH: &str = "test-branch";

/// Environment variables the binary reads; cleared for every run
const PROVIDER_ENV: &[&str] = &[
    "CODESHIP_USERNAME",
    "CODESHIP_PASSWORD",
    "CODESHIP_ORGANIZATION",
    "CI_PROJECT_ID",
    "CI_BUILD_ID",
    "CODESHIP_API_URL",
    "RUST_LOG",
];

/// Test environment
///
/// Owns a temporary directory so a developer's own config file never leaks
/// into a test run.
pub struct TestEnv {
    /// Temporary directory for config files
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Path of the config file the binary will look for
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write the config file
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Command with a clean environment and no arguments
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_codeship-queue"));
        for var in PROVIDER_ENV {
            cmd.env_remove(var);
        }
        cmd.env("CODESHIP_QUEUE_CONFIG", self.config_path());
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }

    /// Command with full credentials pointing at `server`
    pub fn command_for(&self, server: &MockServer, build_id: &str) -> Command {
        let mut cmd = self.command();
        cmd.env("CODESHIP_USERNAME", "test")
            .env("CODESHIP_PASSWORD", "pass")
            .env("CODESHIP_ORGANIZATION", "codeship")
            .env("CI_PROJECT_ID", PROJECT)
            .env("CI_BUILD_ID", build_id)
            .env("CODESHIP_API_URL", server.uri());
        cmd
    }

    /// Run the binary with credentials for `server` and wait for it
    pub async fn run(&self, server: &MockServer, build_id: &str, args: &[&str]) -> Output {
        self.command_for(server, build_id)
            .args(args)
            .output()
            .await
            .expect("Failed to execute codeship-queue")
    }

    /// Start the binary without waiting for it
    pub fn spawn(&self, server: &MockServer, build_id: &str, args: &[&str]) -> Child {
        self.command_for(server, build_id)
            .args(args)
            .spawn()
            .expect("Failed to spawn codeship-queue")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Build JSON as the provider sends it
pub fn build_json(id: &str, branch: &str, status: &str, allocated_at: &str) -> Value {
    json!({
        "uuid": id,
        "project_uuid": PROJECT,
        "organization_uuid": ORG_UUID,
        "ref": format!("heads/{branch}"),
        "commit_sha": "185ab4c7dc4eda2a027c284f7a669cac3f50a5ed",
        "status": status,
        "username": "fillup",
        "commit_message": "implementing auth and starting on projects",
        "finished_at": null,
        "allocated_at": allocated_at,
        "queued_at": allocated_at,
        "branch": branch
    })
}

/// Mount a successful `/auth` for organization "codeship"
pub async fn mount_auth(server: &MockServer) {
    let expires_at = chrono::Utc::now().timestamp() + 3600;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token",
            "expires_at": expires_at,
            "organizations": [{"name": "codeship", "uuid": ORG_UUID, "scopes": []}]
        })))
        .mount(server)
        .await;
}

/// Mount a point lookup, optionally asserting how often it is hit
pub async fn mount_build(server: &MockServer, build: Value, expected_calls: Option<u64>) {
    let id = build["uuid"].as_str().expect("build uuid").to_string();
    let mut mock = Mock::given(method("GET"))
        .and(path(format!(
            "/organizations/{ORG_UUID}/projects/{PROJECT}/builds/{id}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "build": build })));
    if let Some(n) = expected_calls {
        mock = mock.expect(n);
    }
    mock.mount(server).await;
}

/// Mount a single, final page of the build listing
pub async fn mount_list(server: &MockServer, builds: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/organizations/{ORG_UUID}/projects/{PROJECT}/builds")))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "builds": builds })))
        .mount(server)
        .await;
}
