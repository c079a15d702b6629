//! Xcode `project.pbxproj` version fields
//!
//! The project file is edited as text. `CURRENT_PROJECT_VERSION` and
//! `MARKETING_VERSION` appear once per build configuration and target, and
//! every occurrence is rewritten together. Reads take the first one.

use appbump_core::error::{FieldError, Result};
use appbump_core::types::Bump;
use regex::Regex;
use tracing::debug;

use crate::file::{LazyFile, ManagedFile, PathResolver};
use crate::pattern::{FieldPattern, Occurrences};

static PROJECT_VERSION: FieldPattern = FieldPattern::new("CURRENT_PROJECT_VERSION", || {
    Regex::new(r"CURRENT_PROJECT_VERSION = ([^;\n]*);").expect("hardcoded regex must compile")
});

static MARKETING_VERSION: FieldPattern = FieldPattern::new("MARKETING_VERSION", || {
    Regex::new(r"MARKETING_VERSION = ([^;\n]*);").expect("hardcoded regex must compile")
});

/// Build number and marketing version of an Xcode project
pub struct PbxprojManager {
    file: LazyFile<String>,
}

impl PbxprojManager {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            file: LazyFile::new(resolver),
        }
    }

    /// Current project file text
    pub fn read(&mut self) -> Result<&str> {
        Ok(&self.file.load()?.content)
    }

    /// `CURRENT_PROJECT_VERSION` of the first build configuration
    pub fn current_project_version(&mut self) -> Result<u64> {
        let file = self.file.load()?;
        PROJECT_VERSION.extract_number(&file.content, &file.path)
    }

    /// `MARKETING_VERSION` of the first build configuration
    pub fn current_marketing_version(&mut self) -> Result<String> {
        let file = self.file.load()?;
        Ok(MARKETING_VERSION.extract(&file.content, &file.path)?.to_string())
    }

    /// Increment every `CURRENT_PROJECT_VERSION` to one past the first one's value
    pub fn bump_project_version(&mut self) -> Result<Bump<u64>> {
        let file = self.file.load()?;
        let current = PROJECT_VERSION.extract_number(&file.content, &file.path)?;
        let next = current.checked_add(1).ok_or_else(|| FieldError::InvalidNumber {
            field: PROJECT_VERSION.field().to_string(),
            value: current.to_string(),
            file: file.path.clone(),
        })?;
        file.content = PROJECT_VERSION.replace(&file.content, &next.to_string(), Occurrences::All);
        debug!(current, next, "bumped CURRENT_PROJECT_VERSION");
        Ok(Bump::new(current, next))
    }

    /// Set every `MARKETING_VERSION` to `next`, written as-is
    pub fn set_marketing_version(&mut self, next: &str) -> Result<Bump<String>> {
        let file = self.file.load()?;
        let current = MARKETING_VERSION.extract(&file.content, &file.path)?.to_string();
        file.content = MARKETING_VERSION.replace(&file.content, next, Occurrences::All);
        debug!(%current, next, "set MARKETING_VERSION");
        Ok(Bump::new(current, next.to_string()))
    }

    pub fn project_version_field(&self) -> &'static str {
        PROJECT_VERSION.field()
    }

    pub fn marketing_version_field(&self) -> &'static str {
        MARKETING_VERSION.field()
    }
}

impl ManagedFile for PbxprojManager {
    fn kind(&self) -> &'static str {
        "project.pbxproj"
    }

    fn is_loaded(&self) -> bool {
        self.file.is_loaded()
    }

    fn write(&self) -> Result<bool> {
        self.file.flush()
    }
}
