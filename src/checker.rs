use tracing::debug;
use url::Url;

use crate::error::{Result, VersionCheckError};
use crate::normalize::{VersionCode, VersionNormalizer};
use crate::source::{GitHubReleaseSource, ReleaseSource};
use crate::types::{Release, VersionCheckResult, VersionCheckerConfig};

/// State fixed at construction and shared by the async and blocking checkers.
#[derive(Debug, Clone)]
pub(crate) struct CheckerCore {
    current_version_code: VersionCode,
    normalizer: VersionNormalizer,
    endpoint: String,
}

impl CheckerCore {
    /// Validates `config` and normalizes the running version.
    pub(crate) fn new(config: &VersionCheckerConfig) -> Result<Self> {
        if !is_valid_owner(&config.author) || !is_valid_repo_name(&config.repository_name) {
            return Err(VersionCheckError::InvalidRepository(format!(
                "{}/{}",
                config.author, config.repository_name
            )));
        }

        if Url::parse(&config.base_url).is_err() {
            return Err(VersionCheckError::InvalidBaseUrl(config.base_url.clone()));
        }

        let normalizer = VersionNormalizer::new(config.ignored_chars.iter().copied());
        let current_version_code = normalizer.version_code(&config.current_version)?;

        Ok(Self {
            current_version_code,
            normalizer,
            endpoint: config.endpoint(),
        })
    }

    pub(crate) fn current_version_code(&self) -> VersionCode {
        self.current_version_code
    }

    pub(crate) fn ignored_chars(&self) -> &[char] {
        self.normalizer.ignored_chars()
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn version_code(&self, tag: &str) -> Result<VersionCode> {
        self.normalizer.version_code(tag)
    }

    /// Compares a fetched release against the running version.
    pub(crate) fn compare(&self, latest_release: Release) -> Result<VersionCheckResult> {
        let latest_version_code = self.normalizer.version_code(&latest_release.tag_name)?;
        let update_available = self.current_version_code < latest_version_code;

        debug!(
            current = self.current_version_code,
            latest = latest_version_code,
            update_available,
            "compared version codes"
        );

        Ok(VersionCheckResult {
            update_available,
            current_version_code: self.current_version_code,
            latest_version_code,
            latest_release,
        })
    }
}

/// Checks whether a newer GitHub release of a program is available.
///
/// The running version is normalized once at construction. Every query
/// performs its own request; nothing is cached between calls.
///
/// Queries are async and need a tokio runtime. Hosts without one use
/// [`crate::blocking::VersionChecker`].
pub struct VersionChecker<S = GitHubReleaseSource> {
    core: CheckerCore,
    source: S,
}

impl VersionChecker<GitHubReleaseSource> {
    /// Creates a new VersionChecker querying the latest release of `author/repository_name`.
    ///
    /// # Arguments
    /// * `current_version` - The version of the running program (e.g., "v1.0.0").
    /// * `author` - The owner of the repository.
    /// * `repository_name` - The name of the repository.
    /// * `ignored_chars` - Characters removed from every tag before parsing (e.g., `['.', 'v']`).
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
    pub async fn latest_release(&self) -> Result<Release> {
        self.source.fetch_latest_release(self.core.endpoint()).await
    }

    /// Gets the tag of the latest release exactly as published.
    pub async fn latest_tag(&self) -> Result<String> {
        Ok(self.latest_release().await?.tag_name)
    }

    /// Gets the version code of the latest release.
    ///
    /// Fails with `InvalidVersionFormat` if the published tag does not normalize to an integer.
    pub async fn latest_version_code(&self) -> Result<VersionCode> {
        let tag = self.latest_tag().await?;
        self.core.version_code(&tag)
    }

    /// Checks if the latest release has a higher version code than the running program.
    ///
    /// Equal or lower codes mean no update. Failures are returned, never folded into `false`.
    pub async fn is_update_available(&self) -> Result<bool> {
        Ok(self.check().await?.update_available)
    }

    /// Performs a single request and reports the comparison together with the release.
    pub async fn check(&self) -> Result<VersionCheckResult> {
        let latest_release = self.latest_release().await?;
        self.core.compare(latest_release)
    }
}

/// Maximum length for a GitHub username/organization name.
/// This limit is enforced by GitHub.
const MAX_GITHUB_OWNER_LENGTH: usize = 39;

/// Maximum length for a GitHub repository name.
/// This limit is enforced by GitHub.
const MAX_GITHUB_REPO_LENGTH: usize = 100;

/// Owner: alphanumeric or hyphens, cannot start/end with hyphen, max 39 chars
fn is_valid_owner(owner: &str) -> bool {
    !owner.is_empty()
        && owner.len() <= MAX_GITHUB_OWNER_LENGTH
        && !owner.starts_with('-')
        && !owner.ends_with('-')
        && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Repo: alphanumeric, hyphens, underscores, or dots, max 100 chars.
/// `.` and `..` are path segments, not names.
fn is_valid_repo_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.len() <= MAX_GITHUB_REPO_LENGTH
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
