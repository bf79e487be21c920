//! Fetching the latest release from a release API

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{Result, VersionCheckError};
use crate::types::{Release, VersionCheckerConfig};

/// Fetches the latest release published at a releases endpoint.
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Performs a single request to `endpoint` and returns the release it describes.
    ///
    /// # Errors
    /// * `RepositoryUnreachable` - the request failed or the API did not answer with a success status
    /// * `MalformedResponse` - the body is not a release document with a `tag_name`
    async fn fetch_latest_release(&self, endpoint: &str) -> Result<Release>;
}

/// ReleaseSource backed by the GitHub Releases API.
#[derive(Debug, Clone)]
pub struct GitHubReleaseSource {
    client: Client,
}

impl GitHubReleaseSource {
    /// Creates a new source with the User-Agent and timeout from `config`.
    pub fn new(config: &VersionCheckerConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn fetch_latest_release(&self, endpoint: &str) -> Result<Release> {
        debug!(endpoint, "fetching latest release");

        let response = self
            .client
            .get(endpoint)
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|e| unreachable_error(endpoint, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(endpoint, status, &message));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| unreachable_error(endpoint, e.to_string()))?;

        parse_release(endpoint, &body)
    }
}

pub(crate) const GITHUB_ACCEPT: &str = "application/vnd.github+json";
pub(crate) const GITHUB_API_VERSION: &str = "2022-11-28";

pub(crate) fn unreachable_error(endpoint: &str, reason: String) -> VersionCheckError {
    VersionCheckError::RepositoryUnreachable {
        url: endpoint.to_string(),
        reason,
    }
}

/// Maps a non-success status to `RepositoryUnreachable`.
pub(crate) fn status_error(
    endpoint: &str,
    status: reqwest::StatusCode,
    message: &str,
) -> VersionCheckError {
    if status == reqwest::StatusCode::NOT_FOUND {
        return unreachable_error(
            endpoint,
            "repository not found or has no published releases".to_string(),
        );
    }

    warn!("GitHub API returned status {}: {}", status, endpoint);
    unreachable_error(endpoint, format!("status {}: {}", status.as_u16(), message))
}

/// Parses a release document, reporting `MalformedResponse` when it is not one.
pub(crate) fn parse_release(endpoint: &str, body: &[u8]) -> Result<Release> {
    let release: Release = serde_json::from_slice(body).map_err(|e| {
        warn!("Failed to parse GitHub release response: {}", e);
        VersionCheckError::MalformedResponse {
            url: endpoint.to_string(),
            reason: e.to_string(),
        }
    })?;

    debug!(tag_name = %release.tag_name, "fetched latest release");

    Ok(release)
}
