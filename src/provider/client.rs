//! Codeship API client
//!
//! Authenticates with basic credentials, selects the organization by name and
//! serves [`BuildDirectory`] reads with the resulting bearer token. The token
//! is cached and renewed shortly before it expires, so waits that outlast a
//! token stay authenticated.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, LINK};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::defaults::{CONNECT_TIMEOUT, REQUEST_TIMEOUT, TOKEN_REFRESH_MARGIN_SECS};
use crate::config::Settings;
use crate::core::build::Build;
use crate::core::directory::{BuildDirectory, BuildPage};
use crate::error::ApiError;
use crate::provider::links::Links;

const JSON: &str = "application/json";

/// Organization entry from the auth response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub name: String,
    pub uuid: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    /// Unix seconds; zero when the provider omits it
    #[serde(default)]
    expires_at: i64,
    #[serde(default)]
    organizations: Vec<Organization>,
}

#[derive(Debug, Deserialize)]
struct BuildList {
    #[serde(default)]
    builds: Vec<Build>,
}

#[derive(Debug, Deserialize)]
struct BuildEnvelope {
    build: Build,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Clone)]
struct Session {
    token: String,
    organization_uuid: String,
    expires_at: i64,
}

impl Session {
    fn is_fresh(&self, now: i64) -> bool {
        self.expires_at == 0 || self.expires_at - now > TOKEN_REFRESH_MARGIN_SECS
    }
}

/// Client for the Codeship v2 API
pub struct CodeshipClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    organization: String,
    session: Mutex<Option<Session>>,
}

impl CodeshipClient {
    /// Create a client from resolved settings
    ///
    /// No request is made until the first read.
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(super::user_agent())
            .build()
            .map_err(|e| ApiError::Transport {
                url: settings.api_url.clone(),
                error: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            organization: settings.organization.clone(),
            session: Mutex::new(None),
        })
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn session(&self) -> Result<Session, ApiError> {
        let mut guard = self.session.lock().await;
        let now = chrono::Utc::now().timestamp();

        if let Some(session) = guard.as_ref().filter(|s| s.is_fresh(now)) {
            return Ok(session.clone());
        }

        if guard.is_some() {
            tracing::debug!("Access token about to expire, re-authenticating");
        }
        let session = self.authenticate().await?;
        *guard = Some(session.clone());
        Ok(session)
    }

    async fn authenticate(&self) -> Result<Session, ApiError> {
        let url = format!("{}/auth", self.base_url);
        tracing::debug!("Authenticating as {} at {url}", self.username);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| transport(&url, &e))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let message = error_message(response).await;
            return Err(ApiError::Authentication { message });
        }

        let (auth, _) = decode::<AuthResponse>(&url, response).await?;

        let organization = auth
            .organizations
            .into_iter()
            .find(|o| o.name.eq_ignore_ascii_case(&self.organization))
            .ok_or_else(|| ApiError::UnknownOrganization {
                name: self.organization.clone(),
            })?;

        tracing::info!(
            "Authenticated for organization {} ({})",
            organization.name,
            organization.uuid
        );

        Ok(Session {
            token: auth.access_token,
            organization_uuid: organization.uuid,
            expires_at: auth.expires_at,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(T, HeaderMap), ApiError> {
        let session = self.session().await?;
        let url = format!(
            "{}/organizations/{}/{path}",
            self.base_url, session.organization_uuid
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&session.token)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .query(query)
            .send()
            .await
            .map_err(|e| transport(&url, &e))?;

        decode(&url, response).await
    }
}

#[async_trait]
impl BuildDirectory for CodeshipClient {
    async fn list_builds(
        &self,
        project_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<BuildPage, ApiError> {
        let (list, headers) = self
            .get::<BuildList>(
                &format!("projects/{project_id}/builds"),
                &[("page", page.to_string()), ("per_page", per_page.to_string())],
            )
            .await?;

        let links = headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(Links::parse)
            .unwrap_or_default();

        Ok(BuildPage {
            builds: list.builds,
            has_next: links.has_next(),
            is_last_page: links.is_last_page(),
            next_page: links.next_page(),
        })
    }

    async fn get_build(&self, project_id: &str, build_id: &str) -> Result<Build, ApiError> {
        let (envelope, _) = self
            .get::<BuildEnvelope>(&format!("projects/{project_id}/builds/{build_id}"), &[])
            .await?;
        Ok(envelope.build)
    }
}

fn transport(url: &str, error: &reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        error: error.to_string(),
    }
}

async fn decode<T: DeserializeOwned>(
    url: &str,
    response: Response,
) -> Result<(T, HeaderMap), ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            message: error_message(response).await,
        });
    }

    let headers = response.headers().clone();
    let body = response.text().await.map_err(|e| transport(url, &e))?;
    let value = serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        error: e.to_string(),
    })?;
    Ok((value, headers))
}

/// Best-effort error text: the joined `errors` array, else the status reason
async fn error_message(response: Response) -> String {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string();

    match response.text().await {
        Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join(", "),
            _ => fallback,
        },
        Err(_) => fallback,
    }
}
