//! Records produced by a bump run

use appbump_core::types::Bump;
use serde::{Deserialize, Serialize};

/// Version name and build number of one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformVersion {
    pub version_name: String,
    pub version_code: u64,
}

/// Contents of the summary file written after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    pub android: PlatformVersion,
    pub ios: PlatformVersion,
}

/// Build numbers changed by [`super::VersionBumper::bump_codes`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeBumps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<Bump<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<Bump<u64>>,
}

/// Versions changed by [`super::VersionBumper::sync_semver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemverSync {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<Bump<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<Bump<String>>,
    pub manifest: Bump<String>,
}

/// Everything the compute phase changed in memory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BumpReport {
    /// Version every platform was synced to, if sync ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,

    pub codes: CodeBumps,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub semver: Option<SemverSync>,
}
