//! appbump Files - version bumping for React Native style app projects
//!
//! Keeps the marketing version and build numbers of an app in step across
//! three files:
//!
//! - the Xcode `project.pbxproj` (`MARKETING_VERSION`, `CURRENT_PROJECT_VERSION`)
//! - the Android app `build.gradle` (`versionName`, `versionCode`)
//! - the npm `package.json` (`version`)
//!
//! Native project files are treated as text and edited through fixed
//! patterns, so everything outside the matched fields is preserved byte for
//! byte. package.json is parsed and re-serialized.

pub mod file;
pub mod managers;
pub mod orchestration;
pub mod pattern;

pub use appbump_core::error::{AppBumpError, Result};
pub use file::{fixed_path, LazyFile, ManagedFile, PathResolver};
pub use managers::{GradleManager, PackageJsonManager, PbxprojManager};
pub use orchestration::{
    from_host_config, BumpConfig, BumpFlags, BumpReport, HostConfig, VersionBumper, VersionSummary,
};
