//! Android `build.gradle` version fields
//!
//! Handles both the Groovy form (`versionCode 3`, `versionName "1.0"`) and the
//! Kotlin DSL assignment form (`versionCode = 3`).

use appbump_core::error::{FieldError, Result};
use appbump_core::types::Bump;
use regex::Regex;
use tracing::debug;

use crate::file::{LazyFile, ManagedFile, PathResolver};
use crate::pattern::{FieldPattern, Occurrences};

static VERSION_CODE: FieldPattern = FieldPattern::new("versionCode", || {
    Regex::new(r"\bversionCode(?:\s*=\s*|[ \t]+)(\S+)").expect("hardcoded regex must compile")
});

/// Captures the quoted value including its quotes
static VERSION_NAME: FieldPattern = FieldPattern::new("versionName", || {
    Regex::new(r#"\bversionName(?:\s*=\s*|[ \t]+)(["'][^"'\n]*["'])"#)
        .expect("hardcoded regex must compile")
});

/// `versionCode` and `versionName` of an Android app module
pub struct GradleManager {
    file: LazyFile<String>,
}

impl GradleManager {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            file: LazyFile::new(resolver),
        }
    }

    /// Current build script text
    pub fn read(&mut self) -> Result<&str> {
        Ok(&self.file.load()?.content)
    }

    pub fn version_code(&mut self) -> Result<u64> {
        let file = self.file.load()?;
        VERSION_CODE.extract_number(&file.content, &file.path)
    }

    /// `versionName` without its surrounding quotes
    pub fn version_name(&mut self) -> Result<String> {
        let file = self.file.load()?;
        let quoted = VERSION_NAME.extract(&file.content, &file.path)?;
        Ok(unquote(quoted).to_string())
    }

    /// Increment `versionCode` by one
    pub fn bump_code(&mut self) -> Result<Bump<u64>> {
        let file = self.file.load()?;
        let current = VERSION_CODE.extract_number(&file.content, &file.path)?;
        let next = current.checked_add(1).ok_or_else(|| FieldError::InvalidNumber {
            field: VERSION_CODE.field().to_string(),
            value: current.to_string(),
            file: file.path.clone(),
        })?;
        file.content = VERSION_CODE.replace(&file.content, &next.to_string(), Occurrences::First);
        debug!(current, next, "bumped versionCode");
        Ok(Bump::new(current, next))
    }

    /// Replace the text between the existing quotes of `versionName`
    pub fn set_version_name(&mut self, next: &str) -> Result<Bump<String>> {
        let file = self.file.load()?;
        let quoted = VERSION_NAME.extract(&file.content, &file.path)?;
        let current = unquote(quoted).to_string();
        let quote = quoted.chars().next().unwrap_or('"');
        let replacement = format!("{quote}{next}{quote}");
        file.content = VERSION_NAME.replace(&file.content, &replacement, Occurrences::First);
        debug!(%current, next, "set versionName");
        Ok(Bump::new(current, next.to_string()))
    }

    pub fn version_code_field(&self) -> &'static str {
        VERSION_CODE.field()
    }

    pub fn version_name_field(&self) -> &'static str {
        VERSION_NAME.field()
    }
}

impl ManagedFile for GradleManager {
    fn kind(&self) -> &'static str {
        "build.gradle"
    }

    fn is_loaded(&self) -> bool {
        self.file.is_loaded()
    }

    fn write(&self) -> Result<bool> {
        self.file.flush()
    }
}

fn unquote(quoted: &str) -> &str {
    quoted.trim_matches(|c: char| c == '"' || c == '\'')
}
