//! Bump orchestration
//!
//! [`VersionBumper`] owns one manager per project file and drives a run in two
//! phases. [`VersionBumper::dry_run`] computes the next version and applies
//! every edit to the in-memory buffers; [`VersionBumper::run`] then writes the
//! buffers back and emits the optional summary file. A failure in the first
//! phase therefore leaves every file on disk untouched. Writes in the second
//! phase are not transactional across files.

mod config;
mod host;
mod summary;

pub use config::BumpConfig;
pub use host::{
    from_host_config, AndroidProjectConfig, BumpFlags, HostConfig, HostProject, IosProjectConfig,
    XcodeProjectConfig,
};
pub use summary::{BumpReport, CodeBumps, PlatformVersion, SemverSync, VersionSummary};

use std::path::{Path, PathBuf};

use appbump_core::error::{AppBumpError, Result, VersionError};
use appbump_core::output::{change_line, Reporter};
use appbump_core::types::{Platform, ReleaseType, SkipSet};
use appbump_strategies::next_version;
use tracing::{debug, info, instrument};

use crate::file::ManagedFile;
use crate::managers::{GradleManager, PackageJsonManager, PbxprojManager};

/// Applies build number and version bumps across iOS, Android and package.json
pub struct VersionBumper<R: Reporter> {
    release_type: Option<ReleaseType>,
    semver: Option<String>,
    skip_semver_for: SkipSet,
    skip_code_for: SkipSet,
    output_file: Option<PathBuf>,
    root: PathBuf,
    ios: PbxprojManager,
    android: GradleManager,
    manifest: PackageJsonManager,
    reporter: R,
    report: BumpReport,
}

impl<R: Reporter> VersionBumper<R> {
    /// Create a bumper from configuration; no file is touched until a phase runs
    pub fn new(config: BumpConfig, reporter: R) -> Self {
        let BumpConfig {
            release_type,
            semver,
            skip_semver_for,
            skip_code_for,
            output_file,
            root,
            ios_project,
            android_build,
        } = config;

        let manifest = PackageJsonManager::new(BumpConfig::manifest_resolver(&root));

        Self {
            release_type,
            semver,
            skip_semver_for,
            skip_code_for,
            output_file,
            root,
            ios: PbxprojManager::new(ios_project),
            android: GradleManager::new(android_build),
            manifest,
            reporter,
            report: BumpReport::default(),
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// What the last [`Self::dry_run`] changed
    pub fn report(&self) -> &BumpReport {
        &self.report
    }

    /// Increment the build number of every platform not in the skip list
    pub fn bump_codes(&mut self) -> Result<CodeBumps> {
        let mut codes = CodeBumps::default();

        if !self.skip_code_for.skips(Platform::Ios) {
            let bump = self.ios.bump_project_version()?;
            let subject = format!("{} {}", Platform::Ios, self.ios.kind());
            self.reporter.line(&change_line(
                &subject,
                self.ios.project_version_field(),
                bump.previous,
                bump.next,
            ));
            codes.ios = Some(bump);
        }

        if !self.skip_code_for.skips(Platform::Android) {
            let bump = self.android.bump_code()?;
            let subject = format!("{} {}", Platform::Android, self.android.kind());
            self.reporter.line(&change_line(
                &subject,
                self.android.version_code_field(),
                bump.previous,
                bump.next,
            ));
            codes.android = Some(bump);
        }

        Ok(codes)
    }

    /// Set the version name of every platform not in the skip list, and package.json
    pub fn sync_semver(&mut self, target: &str) -> Result<SemverSync> {
        let mut ios = None;
        let mut android = None;

        if !self.skip_semver_for.skips(Platform::Ios) {
            let bump = self.ios.set_marketing_version(target)?;
            let subject = format!("{} {}", Platform::Ios, self.ios.kind());
            self.reporter.line(&change_line(
                &subject,
                self.ios.marketing_version_field(),
                &bump.previous,
                &bump.next,
            ));
            ios = Some(bump);
        }

        if !self.skip_semver_for.skips(Platform::Android) {
            let bump = self.android.set_version_name(target)?;
            let subject = format!("{} {}", Platform::Android, self.android.kind());
            self.reporter.line(&change_line(
                &subject,
                self.android.version_name_field(),
                &bump.previous,
                &bump.next,
            ));
            android = Some(bump);
        }

        let manifest = self.manifest.set_version(target)?;
        let subject = format!("JS {}", self.manifest.kind());
        self.reporter
            .line(&change_line(&subject, "version", &manifest.previous, &manifest.next));

        Ok(SemverSync {
            ios,
            android,
            manifest,
        })
    }

    /// Version every platform should end up on
    ///
    /// An explicit version wins; otherwise the release type is applied to the
    /// current package.json version.
    pub fn target_version(&mut self) -> Result<String> {
        if let Some(version) = &self.semver {
            return Ok(version.clone());
        }

        let release = self.release_type.ok_or(VersionError::MissingReleaseKind)?;
        let current = self.manifest.version()?;
        next_version(&current, Some(release))
    }

    /// Compute and apply every bump in memory without writing anything
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn dry_run(&mut self) -> Result<&mut Self> {
        let sync = !self.skip_semver_for.skips_all();
        let target = if sync {
            Some(self.target_version()?)
        } else {
            None
        };
        debug!(?target, sync, "resolved target version");

        let codes = if self.skip_code_for.skips_all() {
            CodeBumps::default()
        } else {
            self.bump_codes()?
        };

        let semver = match &target {
            Some(target) => Some(self.sync_semver(target)?),
            None => None,
        };

        self.report = BumpReport {
            target_version: target,
            codes,
            semver,
        };
        Ok(self)
    }

    /// Write every loaded file back to disk
    pub fn write(&self) -> Result<()> {
        let managers: [&dyn ManagedFile; 3] = [&self.ios, &self.android, &self.manifest];
        for manager in managers {
            let written = manager.write()?;
            debug!(kind = manager.kind(), written, "write back");
        }
        Ok(())
    }

    /// Run the compute phase, write the results and emit the summary file
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn run(&mut self) -> Result<()> {
        self.dry_run()?;
        self.write()?;

        if let Some(name) = self.output_file.clone() {
            self.save_version_file(&name)?;
        }

        info!(target_version = ?self.report.target_version, "bump completed");
        Ok(())
    }

    /// Current version name and build number of both platforms
    pub fn summary(&mut self) -> Result<VersionSummary> {
        Ok(VersionSummary {
            android: PlatformVersion {
                version_name: self.android.version_name()?,
                version_code: self.android.version_code()?,
            },
            ios: PlatformVersion {
                version_name: self.ios.current_marketing_version()?,
                version_code: self.ios.current_project_version()?,
            },
        })
    }

    /// Write the summary as JSON to `name` under the project root
    pub fn save_version_file(&mut self, name: &Path) -> Result<PathBuf> {
        let summary = self.summary()?;
        let path = self.root.join(name);
        let path = std::path::absolute(&path).map_err(|e| AppBumpError::io(&path, e))?;

        let mut content =
            serde_json::to_string_pretty(&summary).map_err(|e| AppBumpError::json(&path, e))?;
        content.push('\n');

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppBumpError::io(parent, e))?;
        }
        std::fs::write(&path, content).map_err(|e| AppBumpError::io(&path, e))?;

        self.reporter
            .line(&format!("Version file saved to {}", path.display()));
        Ok(path)
    }
}
