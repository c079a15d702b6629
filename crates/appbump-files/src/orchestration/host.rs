//! Host tool configuration adapter
//!
//! React Native tooling describes the native projects with a nested JSON
//! document (`react-native config`). This module turns that document plus the
//! raw command-line flag strings into a [`BumpConfig`]. The project root is
//! checked up front; the native project fields are only checked when the
//! corresponding file is first needed, so a platform that is skipped entirely
//! may be left unconfigured.

use std::path::{Path, PathBuf};

use appbump_core::error::{ConfigError, Result};
use appbump_core::output::Reporter;
use appbump_core::types::{ReleaseType, SkipSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::file::PathResolver;

use super::{BumpConfig, VersionBumper};

/// Host-supplied project description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// Project root holding package.json
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub project: HostProject,
}

/// Native project locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostProject {
    pub ios: Option<IosProjectConfig>,
    pub android: Option<AndroidProjectConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosProjectConfig {
    /// Full path to `project.pbxproj`; wins over the other fields
    pub pbxproj_path: Option<PathBuf>,

    /// Directory containing the `.xcodeproj` bundle
    pub source_dir: Option<PathBuf>,

    pub xcode_project: Option<XcodeProjectConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XcodeProjectConfig {
    /// Bundle name, e.g. `App.xcodeproj`
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidProjectConfig {
    /// Directory containing the app module
    pub source_dir: Option<PathBuf>,

    /// App module name, usually `app`
    pub app_name: Option<String>,
}

/// Raw flag values as received from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpFlags {
    pub release_type: Option<String>,
    pub semver: Option<String>,
    pub skip_semver_for: Option<String>,
    pub skip_code_for: Option<String>,
    pub output_file: Option<String>,
}

fn non_empty_path(value: Option<&PathBuf>) -> Option<&Path> {
    value.map(PathBuf::as_path).filter(|p| !p.as_os_str().is_empty())
}

fn non_empty_str(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn missing(field: &str) -> ConfigError {
    ConfigError::MissingField(field.to_string())
}

impl IosProjectConfig {
    /// Location of `project.pbxproj`, relative paths taken from `root`
    pub fn pbxproj(&self, root: &Path) -> Result<PathBuf> {
        if let Some(path) = non_empty_path(self.pbxproj_path.as_ref()) {
            return Ok(root.join(path));
        }

        let source_dir =
            non_empty_path(self.source_dir.as_ref()).ok_or_else(|| missing("project.ios.sourceDir"))?;
        let xcode_project = self
            .xcode_project
            .as_ref()
            .ok_or_else(|| missing("project.ios.xcodeProject"))?;
        let name = non_empty_str(xcode_project.name.as_ref())
            .ok_or_else(|| missing("project.ios.xcodeProject.name"))?;

        Ok(root.join(source_dir).join(name).join("project.pbxproj"))
    }
}

impl AndroidProjectConfig {
    /// Location of the app module's `build.gradle`, relative paths taken from `root`
    pub fn build_gradle(&self, root: &Path) -> Result<PathBuf> {
        let source_dir = non_empty_path(self.source_dir.as_ref())
            .ok_or_else(|| missing("project.android.sourceDir"))?;
        let app_name = non_empty_str(self.app_name.as_ref())
            .ok_or_else(|| missing("project.android.appName"))?;

        Ok(root.join(source_dir).join(app_name).join("build.gradle"))
    }
}

impl HostConfig {
    /// Standard React Native layout under `root`
    ///
    /// The Xcode project is the first `.xcodeproj` found in `root/ios`; when
    /// there is none the name stays unset and resolving the iOS file fails.
    pub fn detect(root: &Path) -> Self {
        let ios_dir = root.join("ios");
        let xcode_name = std::fs::read_dir(&ios_dir).ok().and_then(|entries| {
            let mut names: Vec<String> = entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().to_string())
                .filter(|name| name.ends_with(".xcodeproj"))
                .collect();
            names.sort();
            names.into_iter().next()
        });
        debug!(root = %root.display(), ?xcode_name, "detected React Native layout");

        Self {
            root: Some(root.to_path_buf()),
            project: HostProject {
                ios: Some(IosProjectConfig {
                    pbxproj_path: None,
                    source_dir: Some(PathBuf::from("ios")),
                    xcode_project: Some(XcodeProjectConfig { name: xcode_name }),
                }),
                android: Some(AndroidProjectConfig {
                    source_dir: Some(PathBuf::from("android")),
                    app_name: Some("app".to_string()),
                }),
            },
        }
    }

    fn ios_resolver(&self, root: &Path) -> PathResolver {
        let ios = self.project.ios.clone();
        let root = root.to_path_buf();
        Box::new(move || {
            ios.as_ref()
                .ok_or_else(|| missing("project.ios"))?
                .pbxproj(&root)
        })
    }

    fn android_resolver(&self, root: &Path) -> PathResolver {
        let android = self.project.android.clone();
        let root = root.to_path_buf();
        Box::new(move || {
            android
                .as_ref()
                .ok_or_else(|| missing("project.android"))?
                .build_gradle(&root)
        })
    }
}

fn parse_skip(value: Option<&String>) -> Result<SkipSet> {
    Ok(value.map(|s| SkipSet::parse(s)).transpose()?.unwrap_or_default())
}

/// Build a [`VersionBumper`] from host configuration and raw flags.
///
/// Returns `Ok(None)` after reporting a notice when both skip lists are
/// exactly `all`, since there would be nothing to do.
pub fn from_host_config<R: Reporter>(
    host: &HostConfig,
    flags: &BumpFlags,
    mut reporter: R,
) -> Result<Option<VersionBumper<R>>> {
    let skip_semver_for = parse_skip(flags.skip_semver_for.as_ref())?;
    let skip_code_for = parse_skip(flags.skip_code_for.as_ref())?;

    if skip_semver_for.is_exactly_all() && skip_code_for.is_exactly_all() {
        info!("all bumps skipped");
        reporter.line("Skipping version bump: both version name and build number are skipped for all platforms");
        return Ok(None);
    }

    let root = non_empty_path(host.root.as_ref())
        .ok_or_else(|| missing("root"))?
        .to_path_buf();

    let semver = non_empty_str(flags.semver.as_ref()).map(str::to_string);
    let raw_release_type = non_empty_str(flags.release_type.as_ref());

    // The release type only matters when the target version is computed.
    let release_type = if semver.is_some() || skip_semver_for.skips_all() {
        if let Some(ignored) = raw_release_type {
            debug!(ignored, "release type not used for this run");
        }
        None
    } else {
        raw_release_type.map(str::parse::<ReleaseType>).transpose()?
    };

    let config = BumpConfig {
        release_type,
        semver,
        skip_semver_for,
        skip_code_for,
        output_file: non_empty_str(flags.output_file.as_ref()).map(PathBuf::from),
        ios_project: host.ios_resolver(&root),
        android_build: host.android_resolver(&root),
        root,
    };
    debug!(?config, "built bump configuration from host config");

    Ok(Some(VersionBumper::new(config, reporter)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use appbump_core::error::{AppBumpError, VersionError};
    use appbump_core::output::MemoryReporter;
    use tempfile::TempDir;

    fn host_json(root: &Path) -> HostConfig {
        serde_json::from_value(serde_json::json!({
            "root": root,
            "project": {
                "ios": {
                    "sourceDir": "ios",
                    "xcodeProject": {"name": "App.xcodeproj"}
                },
                "android": {
                    "sourceDir": "android",
                    "appName": "app"
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_host_config() {
        let host = host_json(Path::new("/work/app"));
        let ios = host.project.ios.as_ref().unwrap();
        assert_eq!(
            ios.pbxproj(Path::new("/work/app")).unwrap(),
            PathBuf::from("/work/app/ios/App.xcodeproj/project.pbxproj")
        );
        let android = host.project.android.as_ref().unwrap();
        assert_eq!(
            android.build_gradle(Path::new("/work/app")).unwrap(),
            PathBuf::from("/work/app/android/app/build.gradle")
        );
    }

    #[test]
    fn test_pbxproj_path_wins() {
        let ios = IosProjectConfig {
            pbxproj_path: Some(PathBuf::from("/abs/project.pbxproj")),
            ..Default::default()
        };
        assert_eq!(
            ios.pbxproj(Path::new("/root")).unwrap(),
            PathBuf::from("/abs/project.pbxproj")
        );
    }

    #[test]
    fn test_missing_ios_name_is_named() {
        let ios = IosProjectConfig {
            source_dir: Some(PathBuf::from("ios")),
            xcode_project: Some(XcodeProjectConfig { name: Some(String::new()) }),
            ..Default::default()
        };
        let err = ios.pbxproj(Path::new("/root")).unwrap_err();
        assert!(matches!(
            err,
            AppBumpError::Config(ConfigError::MissingField(ref field)) if field == "project.ios.xcodeProject.name"
        ));
    }

    #[test]
    fn test_missing_android_app_name_is_named() {
        let android = AndroidProjectConfig {
            source_dir: Some(PathBuf::from("android")),
            app_name: None,
        };
        assert!(matches!(
            android.build_gradle(Path::new("/root")),
            Err(AppBumpError::Config(ConfigError::MissingField(ref field))) if field == "project.android.appName"
        ));
    }

    #[test]
    fn test_everything_skipped_short_circuits() {
        let flags = BumpFlags {
            skip_semver_for: Some("all".to_string()),
            skip_code_for: Some("all".to_string()),
            ..Default::default()
        };

        let mut reporter = MemoryReporter::new();
        assert!(from_host_config(&HostConfig::default(), &flags, &mut reporter)
            .unwrap()
            .is_none());
        assert_eq!(reporter.lines().len(), 1);
    }

    #[test]
    fn test_missing_root() {
        let flags = BumpFlags {
            release_type: Some("patch".to_string()),
            ..Default::default()
        };
        let result = from_host_config(&HostConfig::default(), &flags, MemoryReporter::new());
        assert!(matches!(
            result,
            Err(AppBumpError::Config(ConfigError::MissingField(ref field))) if field == "root"
        ));
    }

    #[test]
    fn test_invalid_release_type() {
        let temp = TempDir::new().unwrap();
        let flags = BumpFlags {
            release_type: Some("huge".to_string()),
            ..Default::default()
        };
        let result = from_host_config(&host_json(temp.path()), &flags, MemoryReporter::new());
        assert!(matches!(
            result,
            Err(AppBumpError::Version(VersionError::InvalidReleaseKind(_)))
        ));
    }

    #[test]
    fn test_explicit_version_ignores_unknown_release_type() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("android/app")).unwrap();
        std::fs::write(
            temp.path().join("android/app/build.gradle"),
            "versionCode 1\nversionName \"1.0.0\"\n",
        )
        .unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"version": "1.0.0"}"#).unwrap();

        let mut host = host_json(temp.path());
        host.project.ios = None;

        let flags = BumpFlags {
            release_type: Some("huge".to_string()),
            semver: Some("2.0.0".to_string()),
            skip_semver_for: Some("ios".to_string()),
            skip_code_for: Some("ios".to_string()),
            ..Default::default()
        };
        let mut bumper = from_host_config(&host, &flags, MemoryReporter::new())
            .unwrap()
            .unwrap();
        bumper.run().unwrap();

        assert!(std::fs::read_to_string(temp.path().join("android/app/build.gradle"))
            .unwrap()
            .contains("versionName \"2.0.0\""));
        assert!(std::fs::read_to_string(temp.path().join("package.json"))
            .unwrap()
            .contains("\"2.0.0\""));
    }

    #[test]
    fn test_skipped_sync_ignores_unknown_release_type() {
        let flags = BumpFlags {
            release_type: Some("huge".to_string()),
            skip_semver_for: Some("all".to_string()),
            ..Default::default()
        };
        let temp = TempDir::new().unwrap();
        assert!(from_host_config(&host_json(temp.path()), &flags, MemoryReporter::new())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_unconfigured_platform_only_fails_when_used() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("android/app")).unwrap();
        std::fs::write(
            temp.path().join("android/app/build.gradle"),
            "versionCode 1\nversionName \"1.0.0\"\n",
        )
        .unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"version": "1.0.0"}"#).unwrap();

        let mut host = host_json(temp.path());
        host.project.ios = None;

        let skip_ios = BumpFlags {
            release_type: Some("minor".to_string()),
            skip_semver_for: Some("ios".to_string()),
            skip_code_for: Some("ios".to_string()),
            ..Default::default()
        };
        let mut bumper = from_host_config(&host, &skip_ios, MemoryReporter::new())
            .unwrap()
            .unwrap();
        bumper.run().unwrap();
        assert!(std::fs::read_to_string(temp.path().join("android/app/build.gradle"))
            .unwrap()
            .contains("versionName \"1.1.0\""));

        let all = BumpFlags {
            release_type: Some("minor".to_string()),
            ..Default::default()
        };
        let mut bumper = from_host_config(&host, &all, MemoryReporter::new()).unwrap().unwrap();
        assert!(matches!(
            bumper.run(),
            Err(AppBumpError::Config(ConfigError::MissingField(ref field))) if field == "project.ios"
        ));
    }

    #[test]
    fn test_detect_layout() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("ios/Shop.xcodeproj")).unwrap();
        std::fs::create_dir_all(temp.path().join("ios/Shop.xcworkspace")).unwrap();

        let host = HostConfig::detect(temp.path());
        let ios = host.project.ios.as_ref().unwrap();
        assert_eq!(
            ios.pbxproj(temp.path()).unwrap(),
            temp.path().join("ios/Shop.xcodeproj/project.pbxproj")
        );
        assert_eq!(
            host.project.android.as_ref().unwrap().build_gradle(temp.path()).unwrap(),
            temp.path().join("android/app/build.gradle")
        );
    }

    #[test]
    fn test_detect_without_xcode_project() {
        let temp = TempDir::new().unwrap();
        let host = HostConfig::detect(temp.path());
        assert!(host.project.ios.unwrap().pbxproj(temp.path()).is_err());
    }
}
