//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{ReleaseType, SkipSet};

/// Defaults read from an `appbump.toml` / `appbump.yaml` file
///
/// Command-line flags take precedence over every value here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release type used when none is passed on the command line
    pub release_type: Option<ReleaseType>,

    /// Platforms whose version name is left untouched
    pub skip_semver_for: SkipSet,

    /// Platforms whose build number is left untouched
    pub skip_code_for: SkipSet,

    /// Summary file written under the project root after a run
    pub output_file: Option<PathBuf>,
}
