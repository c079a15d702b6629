//! Core types for appbump

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, VersionError};

/// Which semantic version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Major version bump (breaking changes)
    Major,
    /// Minor version bump (new features)
    Minor,
    /// Patch version bump (bug fixes)
    Patch,
}

impl ReleaseType {
    /// Returns the string representation of the release type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(VersionError::InvalidReleaseKind(s.to_string())),
        }
    }
}

/// Mobile platform carrying its own version fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS (Xcode project)
    Ios,
    /// Android (Gradle build script)
    Android,
}

impl Platform {
    /// Human-readable name used in progress output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::Android => "Android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Token accepted in a skip list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipTarget {
    Android,
    Ios,
    All,
}

impl FromStr for SkipTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "all" => Ok(Self::All),
            other => Err(ConfigError::InvalidValue {
                field: "skip".to_string(),
                message: format!("unknown platform '{}', expected android, ios or all", other),
            }),
        }
    }
}

/// Set of platforms excluded from one kind of bump
///
/// Parsed from a whitespace-separated list such as `"android ios"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SkipSet(BTreeSet<SkipTarget>);

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated token list
    pub fn parse(tokens: &str) -> Result<Self, ConfigError> {
        tokens
            .split_whitespace()
            .map(SkipTarget::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn with(mut self, target: SkipTarget) -> Self {
        self.0.insert(target);
        self
    }

    /// Whether `all` is part of the set
    pub fn skips_all(&self) -> bool {
        self.0.contains(&SkipTarget::All)
    }

    /// Whether the set is exactly `{all}`
    pub fn is_exactly_all(&self) -> bool {
        self.0.len() == 1 && self.skips_all()
    }

    /// Whether the given platform is excluded
    pub fn skips(&self, platform: Platform) -> bool {
        let target = match platform {
            Platform::Ios => SkipTarget::Ios,
            Platform::Android => SkipTarget::Android,
        };
        self.skips_all() || self.0.contains(&target)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for SkipSet {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SkipSet> for String {
    fn from(set: SkipSet) -> Self {
        set.to_string()
    }
}

impl fmt::Display for SkipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self
            .0
            .iter()
            .map(|t| match t {
                SkipTarget::Android => "android",
                SkipTarget::Ios => "ios",
                SkipTarget::All => "all",
            })
            .collect();
        write!(f, "{}", tokens.join(" "))
    }
}

/// Outcome of a mutating version operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bump<T> {
    /// Value before the operation
    pub previous: T,
    /// Value written by the operation
    pub next: T,
}

impl<T> Bump<T> {
    pub fn new(previous: T, next: T) -> Self {
        Self { previous, next }
    }
}
