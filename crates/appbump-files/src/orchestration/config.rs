//! Orchestrator configuration

use std::path::{Path, PathBuf};

use appbump_core::config::MANIFEST_FILE;
use appbump_core::types::{ReleaseType, SkipSet};

use crate::file::{fixed_path, PathResolver};

/// Everything a single bump run needs
///
/// Built once per invocation and consumed by [`super::VersionBumper::new`].
pub struct BumpConfig {
    /// How to derive the next version from package.json
    pub release_type: Option<ReleaseType>,

    /// Explicit next version; wins over `release_type`
    pub semver: Option<String>,

    /// Platforms whose marketing version is left untouched
    pub skip_semver_for: SkipSet,

    /// Platforms whose build number is left untouched
    pub skip_code_for: SkipSet,

    /// Summary file, relative to `root`
    pub output_file: Option<PathBuf>,

    /// Project root holding package.json
    pub root: PathBuf,

    /// Locates the Xcode `project.pbxproj`
    pub ios_project: PathResolver,

    /// Locates the Android app `build.gradle`
    pub android_build: PathResolver,
}

impl BumpConfig {
    /// Configuration with fixed file locations and nothing skipped
    pub fn new(root: impl Into<PathBuf>, ios_project: PathResolver, android_build: PathResolver) -> Self {
        Self {
            release_type: None,
            semver: None,
            skip_semver_for: SkipSet::default(),
            skip_code_for: SkipSet::default(),
            output_file: None,
            root: root.into(),
            ios_project,
            android_build,
        }
    }

    pub fn with_release_type(mut self, release_type: ReleaseType) -> Self {
        self.release_type = Some(release_type);
        self
    }

    pub fn with_semver(mut self, version: impl Into<String>) -> Self {
        self.semver = Some(version.into());
        self
    }

    pub fn with_skip_semver_for(mut self, skip: SkipSet) -> Self {
        self.skip_semver_for = skip;
        self
    }

    pub fn with_skip_code_for(mut self, skip: SkipSet) -> Self {
        self.skip_code_for = skip;
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = Some(output_file.into());
        self
    }

    /// Resolver for the package manifest under `root`
    pub(crate) fn manifest_resolver(root: &Path) -> PathResolver {
        fixed_path(root.join(MANIFEST_FILE))
    }
}

impl std::fmt::Debug for BumpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BumpConfig")
            .field("release_type", &self.release_type)
            .field("semver", &self.semver)
            .field("skip_semver_for", &self.skip_semver_for)
            .field("skip_code_for", &self.skip_code_for)
            .field("output_file", &self.output_file)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
