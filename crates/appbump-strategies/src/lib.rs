//! appbump Strategies - version increment for marketing versions

mod semver;
pub mod types;

pub use crate::semver::SemVerStrategy;
pub use types::VersionComponents;

use appbump_core::error::{Result, VersionError};
use appbump_core::types::ReleaseType;

/// Compute the version following `version` for the given release type.
///
/// An absent release type is rejected the same way an unknown one is.
pub fn next_version(version: &str, release: Option<ReleaseType>) -> Result<String> {
    let release = release.ok_or_else(|| VersionError::InvalidReleaseKind("<none>".to_string()))?;
    SemVerStrategy::new().increment(version, release)
}
