//! Lazily loaded, write-once project files
//!
//! Each managed file is read at most once per run. All edits happen on the
//! in-memory copy and nothing touches the disk until [`ManagedFile::write`].

use std::path::{Path, PathBuf};

use appbump_core::error::{AppBumpError, Result};
use tracing::debug;

/// Computes a file's location on first use
pub type PathResolver = Box<dyn Fn() -> Result<PathBuf> + Send + Sync>;

/// Resolver for a path that is already known
pub fn fixed_path(path: impl Into<PathBuf>) -> PathResolver {
    let path = path.into();
    Box::new(move || Ok(path.clone()))
}

/// In-memory representation of a file's contents
pub trait FileFormat: Sized {
    /// Build the representation from the file's text
    fn decode(path: &Path, text: &str) -> Result<Self>;

    /// Render the representation back to text
    fn encode(&self, path: &Path) -> Result<String>;
}

impl FileFormat for String {
    fn decode(_path: &Path, text: &str) -> Result<Self> {
        Ok(text.to_string())
    }

    fn encode(&self, _path: &Path) -> Result<String> {
        Ok(self.clone())
    }
}

/// A file's contents together with where they came from
#[derive(Debug)]
pub struct Loaded<T> {
    pub path: PathBuf,
    pub content: T,
}

/// A file that is resolved, read and decoded on first access
pub struct LazyFile<T> {
    resolver: PathResolver,
    resolved: Option<PathBuf>,
    loaded: Option<Loaded<T>>,
}

impl<T: FileFormat> LazyFile<T> {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            resolved: None,
            loaded: None,
        }
    }

    /// Location of the file, resolving it on first call
    pub fn path(&mut self) -> Result<&Path> {
        let path = match self.resolved.take() {
            Some(path) => path,
            None => {
                let path = (self.resolver)()?;
                debug!(path = %path.display(), "resolved file path");
                path
            }
        };
        Ok(self.resolved.insert(path))
    }

    /// Contents of the file, reading it from disk on first call
    pub fn load(&mut self) -> Result<&mut Loaded<T>> {
        let loaded = match self.loaded.take() {
            Some(loaded) => loaded,
            None => {
                let path = self.path()?.to_path_buf();
                let text = std::fs::read_to_string(&path).map_err(|e| AppBumpError::io(&path, e))?;
                debug!(path = %path.display(), bytes = text.len(), "loaded file");
                let content = T::decode(&path, &text)?;
                Loaded { path, content }
            }
        };
        Ok(self.loaded.insert(loaded))
    }

    /// Whether the file has been read
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Persist the in-memory contents. Returns `false` when the file was never read.
    pub fn flush(&self) -> Result<bool> {
        let Some(loaded) = &self.loaded else {
            return Ok(false);
        };

        let text = loaded.content.encode(&loaded.path)?;
        std::fs::write(&loaded.path, text).map_err(|e| AppBumpError::io(&loaded.path, e))?;
        debug!(path = %loaded.path.display(), "wrote file");
        Ok(true)
    }
}

/// Shared behaviour of every version-bearing file
pub trait ManagedFile {
    /// File name shown in progress output, e.g. `build.gradle`
    fn kind(&self) -> &'static str;

    /// Whether the file has been read during this run
    fn is_loaded(&self) -> bool;

    /// Write the buffer back if it was loaded; a no-op otherwise
    fn write(&self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_load_reads_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        std::fs::write(&path, "original").unwrap();

        let mut file: LazyFile<String> = LazyFile::new(fixed_path(&path));
        assert_eq!(file.load().unwrap().content, "original");

        std::fs::write(&path, "changed on disk").unwrap();
        assert_eq!(file.load().unwrap().content, "original");
    }

    #[test]
    fn test_resolver_called_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        std::fs::write(&path, "x").unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let resolver: PathResolver = Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(path.clone())
        });

        let mut file: LazyFile<String> = LazyFile::new(resolver);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        file.path().unwrap();
        file.load().unwrap();
        file.load().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_flush_without_load_is_noop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");

        let file: LazyFile<String> = LazyFile::new(fixed_path(&path));
        assert!(!file.flush().unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_flush_writes_buffer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        std::fs::write(&path, "before").unwrap();

        let mut file: LazyFile<String> = LazyFile::new(fixed_path(&path));
        file.load().unwrap().content = "after".to_string();
        assert!(file.flush().unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "after");

        assert!(file.flush().unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "after");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let mut file: LazyFile<String> = LazyFile::new(fixed_path(temp.path().join("nope")));
        assert!(matches!(file.load(), Err(AppBumpError::Io { .. })));
        assert!(!file.is_loaded());
    }
}
