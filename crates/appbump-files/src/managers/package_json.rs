//! npm `package.json` version field

use std::path::Path;

use appbump_core::error::{AppBumpError, FieldError, Result};
use appbump_core::types::Bump;
use serde_json::{Map, Value};
use tracing::debug;

use crate::file::{FileFormat, LazyFile, ManagedFile, PathResolver};

/// package.json contents with key order preserved
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    fields: Map<String, Value>,
}

impl PackageJson {
    /// The `version` field, if it is a string
    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: &str) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }
}

impl FileFormat for PackageJson {
    fn decode(path: &Path, text: &str) -> Result<Self> {
        match serde_json::from_str(text).map_err(|e| AppBumpError::json(path, e))? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(FieldError::PatternNotFound {
                field: "version".to_string(),
                file: path.to_path_buf(),
            }
            .into()),
        }
    }

    fn encode(&self, path: &Path) -> Result<String> {
        let mut content =
            serde_json::to_string_pretty(&self.fields).map_err(|e| AppBumpError::json(path, e))?;
        content.push('\n');
        Ok(content)
    }
}

/// Canonical version held in the package manifest
pub struct PackageJsonManager {
    file: LazyFile<PackageJson>,
}

impl PackageJsonManager {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            file: LazyFile::new(resolver),
        }
    }

    pub fn version(&mut self) -> Result<String> {
        let file = self.file.load()?;
        file.content.version().map(str::to_string).ok_or_else(|| {
            FieldError::PatternNotFound {
                field: "version".to_string(),
                file: file.path.clone(),
            }
            .into()
        })
    }

    pub fn set_version(&mut self, next: &str) -> Result<Bump<String>> {
        let current = self.version()?;
        self.file.load()?.content.set_version(next);
        debug!(%current, next, "set package.json version");
        Ok(Bump::new(current, next.to_string()))
    }
}

impl ManagedFile for PackageJsonManager {
    fn kind(&self) -> &'static str {
        "package.json"
    }

    fn is_loaded(&self) -> bool {
        self.file.is_loaded()
    }

    fn write(&self) -> Result<bool> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::fixed_path;
    use tempfile::TempDir;

    fn manager(temp: &TempDir, content: &str) -> (PackageJsonManager, std::path::PathBuf) {
        let path = temp.path().join("package.json");
        std::fs::write(&path, content).unwrap();
        (PackageJsonManager::new(fixed_path(&path)), path)
    }

    #[test]
    fn test_version() {
        let temp = TempDir::new().unwrap();
        let (mut pkg, _) = manager(&temp, r#"{"name": "app", "version": "1.10.6"}"#);

        assert_eq!(pkg.version().unwrap(), "1.10.6");
    }

    #[test]
    fn test_set_version_preserves_key_order() {
        let temp = TempDir::new().unwrap();
        let (mut pkg, path) = manager(
            &temp,
            r#"{"name": "app", "version": "1.10.6", "private": true, "scripts": {"start": "react-native start"}}"#,
        );

        let bump = pkg.set_version("1.10.7").unwrap();
        assert_eq!(bump, Bump::new("1.10.6".to_string(), "1.10.7".to_string()));
        pkg.write().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"app\",\n  \"version\": \"1.10.7\",\n  \"private\": true,\n  \"scripts\": {\n    \"start\": \"react-native start\"\n  }\n}\n"
        );
    }

    #[test]
    fn test_missing_version() {
        let temp = TempDir::new().unwrap();
        let (mut pkg, _) = manager(&temp, r#"{"name": "app"}"#);

        assert!(matches!(
            pkg.version(),
            Err(AppBumpError::Field(FieldError::PatternNotFound { .. }))
        ));
    }

    #[test]
    fn test_invalid_json() {
        let temp = TempDir::new().unwrap();
        let (mut pkg, _) = manager(&temp, "{ not json");

        assert!(matches!(pkg.version(), Err(AppBumpError::Json { .. })));
    }

    #[test]
    fn test_untouched_manifest_is_not_written() {
        let temp = TempDir::new().unwrap();
        let (pkg, path) = manager(&temp, r#"{"version":"1.0.0"}"#);

        assert!(!pkg.write().unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"version":"1.0.0"}"#);
    }
}
