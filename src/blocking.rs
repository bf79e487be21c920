//! A blocking update checker.
//!
//! Each query issues one request on the calling thread and waits for the
//! full response. No async runtime is needed; do not call these from inside
//! one.
//!
//! ```no_run
//! use ghupdate::blocking::VersionChecker;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = VersionChecker::new("v1.0.0", "owner", "repo", ['.', 'v'])?;
//!
//!     if checker.is_update_available()? {
//!         println!("Update available: {}", checker.latest_tag()?);
//!     }
//!
//!     Ok(())
//! }
//! ```

use reqwest::blocking::Client;
use tracing::debug;

use crate::checker::CheckerCore;
use crate::error::Result;
use crate::normalize::VersionCode;
use crate::source::{
    parse_release, status_error, unreachable_error, GITHUB_ACCEPT, GITHUB_API_VERSION,
};
use crate::types::{Release, VersionCheckResult, VersionCheckerConfig};

/// Fetches the latest release published at a releases endpoint, blocking the caller.
pub trait ReleaseSource: Send + Sync {
    /// Performs a single request to `endpoint` and returns the release it describes.
    ///
    /// # Errors
    /// * `RepositoryUnreachable` - the request failed or the API did not answer with a success status
    /// * `MalformedResponse` - the body is not a release document with a `tag_name`
    fn fetch_latest_release(&self, endpoint: &str) -> Result<Release>;
}

/// Blocking ReleaseSource backed by the GitHub Releases API.
#[derive(Debug, Clone)]
pub struct GitHubReleaseSource {
    client: Client,
}

impl GitHubReleaseSource {
    /// Creates a new source with the User-Agent and timeout from `config`.
    ///
    /// Without a configured timeout requests wait indefinitely.
    pub fn new(config: &VersionCheckerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl ReleaseSource for GitHubReleaseSource {
    fn fetch_latest_release(&self, endpoint: &str) -> Result<Release> {
        debug!(endpoint, "fetching latest release");

        let response = self
            .client
            .get(endpoint)
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .map_err(|e| unreachable_error(endpoint, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(status_error(endpoint, status, &message));
        }

        let body = response
            .bytes()
            .map_err(|e| unreachable_error(endpoint, e.to_string()))?;

        parse_release(endpoint, &body)
    }
}

/// Checks whether a newer GitHub release of a program is available, blocking the caller.
///
/// The running version is normalized once at construction. Every query
/// performs its own request; nothing is cached between calls.
pub struct VersionChecker<S = GitHubReleaseSource> {
    core: CheckerCore,
    source: S,
}

impl VersionChecker<GitHubReleaseSource> {
    /// Creates a new VersionChecker querying the latest release of `author/repository_name`.
    ///
    /// Fails with `InvalidVersionFormat` if `current_version` does not normalize to an integer.
    pub fn new(
        current_version: impl Into<String>,
        author: impl Into<String>,
        repository_name: impl Into<String>,
        ignored_chars: impl IntoIterator<Item = char>,
    ) -> Result<Self> {
        let config = VersionCheckerConfig::new(current_version, author, repository_name)
            .ignored_chars(ignored_chars);
        Self::with_config(config)
    }

    /// Creates a new VersionChecker with the given configuration.
    pub fn with_config(config: VersionCheckerConfig) -> Result<Self> {
        let source = GitHubReleaseSource::new(&config)?;
        Self::with_source(config, source)
    }
}

impl<S: ReleaseSource> VersionChecker<S> {
    /// Creates a new VersionChecker that fetches releases through `source`.
    pub fn with_source(config: VersionCheckerConfig, source: S) -> Result<Self> {
        Ok(Self {
            core: CheckerCore::new(&config)?,
            source,
        })
    }

    /// The version code of the running program.
    pub fn current_version_code(&self) -> VersionCode {
        self.core.current_version_code()
    }

    /// The characters removed from tags before parsing.
    pub fn ignored_chars(&self) -> &[char] {
        self.core.ignored_chars()
    }

    /// The "latest release" endpoint queried by this checker.
    pub fn endpoint(&self) -> &str {
        self.core.endpoint()
    }

    /// Gets the latest release of the repository.
    pub fn latest_release(&self) -> Result<Release> {
        self.source.fetch_latest_release(self.core.endpoint())
    }

    /// Gets the tag of the latest release exactly as published.
    pub fn latest_tag(&self) -> Result<String> {
        Ok(self.latest_release()?.tag_name)
    }

    /// Gets the version code of the latest release.
    pub fn latest_version_code(&self) -> Result<VersionCode> {
        let tag = self.latest_tag()?;
        self.core.version_code(&tag)
    }

    /// Checks if the latest release has a higher version code than the running program.
    pub fn is_update_available(&self) -> Result<bool> {
        Ok(self.check()?.update_available)
    }

    /// Performs a single request and reports the comparison together with the release.
    pub fn check(&self) -> Result<VersionCheckResult> {
        let latest_release = self.latest_release()?;
        self.core.compare(latest_release)
    }
}
