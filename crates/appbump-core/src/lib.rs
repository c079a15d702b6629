//! appbump Core - shared types for app version bumping
//!
//! This crate provides the error types, platform and release types,
//! configuration loading and progress reporting used by the rest of appbump.

pub mod config;
pub mod error;
pub mod output;
pub mod types;

pub use error::{AppBumpError, ConfigError, FieldError, Result, VersionError};
pub use output::{MemoryReporter, Reporter, StdoutReporter};
pub use types::{Bump, Platform, ReleaseType, SkipSet, SkipTarget};
