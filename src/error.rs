use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur when using the VersionChecker.
#[derive(Error, Debug)]
pub enum VersionCheckError {
    /// A version tag is not a base-10 integer once the ignored characters are removed.
    #[error("Invalid version format: '{tag}' normalizes to '{normalized}': {source}")]
    InvalidVersionFormat {
        tag: String,
        normalized: String,
        #[source]
        source: ParseIntError,
    },

    /// The release API could not be reached or did not answer with a release.
    #[error("Repository unreachable at {url}: {reason}")]
    RepositoryUnreachable { url: String, reason: String },

    /// The release API answered, but the body was not a release document.
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// Invalid author or repository name.
    #[error("Invalid repository: '{0}'")]
    InvalidRepository(String),

    /// Invalid base URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for VersionChecker operations.
pub type Result<T> = std::result::Result<T, VersionCheckError>;
