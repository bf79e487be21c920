use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::VersionCode;

/// Default base URL for the GitHub API.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Configuration for the VersionChecker.
#[derive(Debug, Clone)]
pub struct VersionCheckerConfig {
    /// The version of the running program (e.g., "v1.0.0").
    pub current_version: String,
    /// The owner of the repository.
    pub author: String,
    /// The name of the repository.
    pub repository_name: String,
    /// Characters removed from every tag before it is parsed. Default is empty.
    pub ignored_chars: Vec<char>,
    /// Optional timeout for each request. No timeout by default.
    pub timeout: Option<Duration>,
    /// User-Agent sent with each request.
    pub user_agent: String,
    /// Base URL for GitHub API (for testing). Defaults to "https://api.github.com".
    pub(crate) base_url: String,
}

impl VersionCheckerConfig {
    /// Creates a new config for the given running version and repository.
    pub fn new(
        current_version: impl Into<String>,
        author: impl Into<String>,
        repository_name: impl Into<String>,
    ) -> Self {
        Self {
            current_version: current_version.into(),
            author: author.into(),
            repository_name: repository_name.into(),
            ignored_chars: Vec::new(),
            timeout: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets a custom base URL (for testing or GitHub Enterprise).
    #[doc(hidden)]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the characters removed from tags before parsing (e.g., `['.', 'v']`).
    pub fn ignored_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.ignored_chars = chars.into_iter().collect();
        self
    }

    /// Sets a timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The "latest release" endpoint for the configured repository.
    pub(crate) fn endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url.trim_end_matches('/'),
            self.author,
            self.repository_name
        )
    }
}

/// Represents the latest GitHub release of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// The release tag name exactly as published (e.g., "v1.0.0").
    pub tag_name: String,
    /// The release name/title.
    #[serde(default)]
    pub name: Option<String>,
    /// The release body/description.
    #[serde(default)]
    pub body: Option<String>,
    /// Whether this is a prerelease.
    #[serde(default)]
    pub prerelease: bool,
    /// Whether this is a draft release.
    #[serde(default)]
    pub draft: bool,
    /// The URL to the release page.
    #[serde(default)]
    pub html_url: Option<String>,
    /// When the release was published.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// The result of a version check.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionCheckResult {
    /// Whether the latest release has a higher version code than the running program.
    pub update_available: bool,
    /// The version code of the running program.
    pub current_version_code: VersionCode,
    /// The version code of the latest release.
    pub latest_version_code: VersionCode,
    /// The latest release.
    pub latest_release: Release,
}
