//! Error types for appbump

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using AppBumpError
pub type Result<T> = std::result::Result<T, AppBumpError>;

/// Main error type for appbump operations
#[derive(Debug, Error)]
pub enum AppBumpError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Version field lookup errors
    #[error(transparent)]
    Field(#[from] FieldError),

    /// IO errors
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version string is not `<major>.<minor>.<patch>`
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),

    /// Unrecognized release type token
    #[error("Invalid release type '{0}', expected one of: major, minor, patch")]
    InvalidReleaseKind(String),

    /// Version sync requested without a release type or explicit version
    #[error("Missing release type: pass --type <major|minor|patch> or --semver <version>")]
    MissingReleaseKind,
}

/// Errors raised while reading a version field out of a file
#[derive(Debug, Error)]
pub enum FieldError {
    /// The field's pattern did not match the file content
    #[error("{field} not found in {}", file.display())]
    PatternNotFound { field: String, file: PathBuf },

    /// A build counter did not parse as an integer
    #[error("Invalid {field} in {}: '{value}' is not a number", file.display())]
    InvalidNumber {
        field: String,
        value: String,
        file: PathBuf,
    },
}

impl AppBumpError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error with the path it happened on
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Get exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Version(_) => 4,
            Self::Field(_) => 5,
            Self::Io { .. } => 7,
            Self::Json { .. } => 8,
        }
    }
}
