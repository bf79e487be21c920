//! Turns version tags into comparable integer codes.
//!
//! A tag is normalized by dropping every ignored character wherever it
//! occurs and parsing what is left as a base-10 integer. This flattens the
//! tag, it does not compare dotted fields: `"1.2.10"` becomes `1210` and
//! `"1.3"` becomes `13`, so tags whose fields have different widths can
//! compare in an order that differs from semantic versioning.

use tracing::debug;

use crate::error::{Result, VersionCheckError};

/// The integer a tag normalizes to.
pub type VersionCode = i32;

/// Strips a fixed set of ignored characters from tags and parses the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionNormalizer {
    ignored_chars: Vec<char>,
}

impl VersionNormalizer {
    /// Creates a normalizer that removes the given characters from every tag.
    pub fn new(ignored_chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            ignored_chars: ignored_chars.into_iter().collect(),
        }
    }

    /// The characters removed from every tag.
    pub fn ignored_chars(&self) -> &[char] {
        &self.ignored_chars
    }

    /// Returns `tag` without any of the ignored characters, in original order.
    ///
    /// Membership is tested per character, so a `'v'` is removed anywhere in
    /// the tag and not only as a prefix.
    pub fn strip(&self, tag: &str) -> String {
        tag.chars()
            .filter(|c| !self.ignored_chars.contains(c))
            .collect()
    }

    /// Normalizes `tag` into its version code.
    ///
    /// Fails with [`VersionCheckError::InvalidVersionFormat`] when the stripped
    /// tag is empty, still contains a non-digit, or does not fit a [`VersionCode`].
    pub fn version_code(&self, tag: &str) -> Result<VersionCode> {
        let normalized = self.strip(tag);

        match normalized.parse::<VersionCode>() {
            Ok(code) => {
                debug!(tag, code, "normalized version tag");
                Ok(code)
            }
            Err(source) => Err(VersionCheckError::InvalidVersionFormat {
                tag: tag.to_string(),
                normalized,
                source,
            }),
        }
    }
}

/// Normalizes a single tag without keeping a [`VersionNormalizer`] around.
pub fn normalize(tag: &str, ignored_chars: &[char]) -> Result<VersionCode> {
    VersionNormalizer::new(ignored_chars.iter().copied()).version_code(tag)
}
