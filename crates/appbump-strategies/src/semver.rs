//! SemVer version strategy

use appbump_core::error::{Result, VersionError};
use appbump_core::types::ReleaseType;
use tracing::debug;

use crate::types::VersionComponents;

/// Semantic Versioning strategy for `<major>.<minor>.<patch>` marketing versions
///
/// Well-formed versions are parsed with the `semver` crate. Anything else falls
/// back to reading the leading digits of the first three dot-separated
/// components, so `1.4.2-beta` and `1.4.2b` both read as `1.4.2`. Pre-release
/// and build suffixes never survive a bump.
#[derive(Debug, Default, Clone, Copy)]
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }

    /// Parse a version string into components
    pub fn parse(&self, version: &str) -> Result<VersionComponents> {
        let trimmed = version.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        if let Ok(v) = semver::Version::parse(trimmed) {
            return Ok(VersionComponents::from(&v));
        }

        debug!(version, "not strict semver, parsing leading digits");
        let mut parts = trimmed.split('.');
        let mut component = || {
            parts
                .next()
                .and_then(leading_integer)
                .ok_or_else(|| VersionError::InvalidFormat(version.to_string()))
        };

        Ok(VersionComponents::new(component()?, component()?, component()?))
    }

    /// Bump the version according to the release type
    pub fn bump(&self, current: VersionComponents, release: ReleaseType) -> VersionComponents {
        match release {
            ReleaseType::Major => VersionComponents::new(current.major + 1, 0, 0),
            ReleaseType::Minor => VersionComponents::new(current.major, current.minor + 1, 0),
            ReleaseType::Patch => {
                VersionComponents::new(current.major, current.minor, current.patch + 1)
            }
        }
    }

    /// Parse, bump and format in one step
    pub fn increment(&self, version: &str, release: ReleaseType) -> Result<String> {
        let current = self.parse(version)?;
        let next = self.bump(current, release);
        debug!(%current, %next, %release, "incremented version");
        Ok(next.to_string())
    }
}

/// Integer value of the leading decimal digits, ignoring leading whitespace
fn leading_integer(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let strategy = SemVerStrategy::new();
        let v = strategy.parse("1.10.6").unwrap();

        assert_eq!(v, VersionComponents::new(1, 10, 6));
    }

    #[test]
    fn test_parse_with_v_prefix() {
        let strategy = SemVerStrategy::new();
        assert_eq!(strategy.parse("v2.0.1").unwrap(), VersionComponents::new(2, 0, 1));
    }

    #[test]
    fn test_parse_with_prerelease() {
        let strategy = SemVerStrategy::new();
        assert_eq!(
            strategy.parse("1.0.0-alpha.1").unwrap(),
            VersionComponents::new(1, 0, 0)
        );
    }

    #[test]
    fn test_parse_truncates_trailing_garbage() {
        let strategy = SemVerStrategy::new();
        assert_eq!(strategy.parse("1.2.3b").unwrap(), VersionComponents::new(1, 2, 3));
        assert_eq!(strategy.parse("01.2.3").unwrap(), VersionComponents::new(1, 2, 3));
    }

    #[test]
    fn test_parse_rejects_missing_component() {
        let strategy = SemVerStrategy::new();
        assert!(matches!(
            strategy.parse("1.2"),
            Err(appbump_core::AppBumpError::Version(VersionError::InvalidFormat(_)))
        ));
        assert!(strategy.parse("one.two.three").is_err());
    }

    #[test]
    fn test_bump_major() {
        let strategy = SemVerStrategy::new();
        assert_eq!(strategy.increment("1.2.3", ReleaseType::Major).unwrap(), "2.0.0");
    }

    #[test]
    fn test_bump_minor() {
        let strategy = SemVerStrategy::new();
        assert_eq!(strategy.increment("1.2.3", ReleaseType::Minor).unwrap(), "1.3.0");
    }

    #[test]
    fn test_bump_patch() {
        let strategy = SemVerStrategy::new();
        assert_eq!(strategy.increment("1.10.6", ReleaseType::Patch).unwrap(), "1.10.7");
    }

    #[test]
    fn test_bump_patch_from_prerelease_increments() {
        let strategy = SemVerStrategy::new();
        assert_eq!(
            strategy.increment("1.2.3-rc.1", ReleaseType::Patch).unwrap(),
            "1.2.4"
        );
    }

    #[test]
    fn test_bump_resets_lower_components() {
        let strategy = SemVerStrategy::new();
        for (version, release) in [
            ("0.9.9", ReleaseType::Major),
            ("4.5.6", ReleaseType::Minor),
            ("10.20.30", ReleaseType::Patch),
        ] {
            let current = strategy.parse(version).unwrap();
            let next = strategy.bump(current, release);
            match release {
                ReleaseType::Major => {
                    assert_eq!((next.major, next.minor, next.patch), (current.major + 1, 0, 0))
                }
                ReleaseType::Minor => assert_eq!(
                    (next.major, next.minor, next.patch),
                    (current.major, current.minor + 1, 0)
                ),
                ReleaseType::Patch => assert_eq!(
                    (next.major, next.minor, next.patch),
                    (current.major, current.minor, current.patch + 1)
                ),
            }
        }
    }
}
