//! # ghupdate
//!
//! A library for checking whether a newer GitHub release of a program is available.
//!
//! Tags are compared as version codes: every ignored character is removed and
//! the rest is parsed as a base-10 integer, so `"v1.2.0"` becomes `120`. This
//! is not semantic versioning. `"1.2.10"` (`1210`) compares as newer than
//! `"1.3"` (`13`), so keep the width of each version field fixed.
//!
//! Queries come in two flavors. [`blocking::VersionChecker`] performs each
//! request on the calling thread and needs no runtime. [`VersionChecker`] is
//! the async equivalent for hosts already running tokio.
//!
//! ## Example
//!
//! ```no_run
//! use ghupdate::VersionChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = VersionChecker::new("v1.0.0", "owner", "repo", ['.', 'v'])?;
//!
//!     // Get the latest published tag
//!     println!("Latest release: {}", checker.latest_tag().await?);
//!
//!     // Check if an update is available
//!     if checker.is_update_available().await? {
//!         println!("Update available");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod blocking;
mod checker;
mod error;
mod normalize;
mod source;
mod types;

pub use checker::VersionChecker;
pub use error::{Result, VersionCheckError};
pub use normalize::{normalize, VersionCode, VersionNormalizer};
pub use source::{GitHubReleaseSource, ReleaseSource};
pub use types::{Release, VersionCheckResult, VersionCheckerConfig};
