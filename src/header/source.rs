// Mon Oct 19 2026 - Alex

use crate::header::error::HeaderError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Supplies header text by configured relative path. `Ok(None)` means the
/// header does not exist, which callers treat as a recoverable condition.
pub trait HeaderSource: Send + Sync {
    fn read(&self, relative_path: &str) -> Result<Option<String>, HeaderError>;

    fn describe(&self, relative_path: &str) -> String {
        relative_path.to_string()
    }
}

/// Reads headers from an engine source checkout on disk
#[derive(Debug, Clone)]
pub struct FsHeaderSource {
    root: PathBuf,
}

impl FsHeaderSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configured paths always use forward slashes
    pub fn resolve(&self, relative_path: &str) -> PathBuf {
        relative_path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

impl HeaderSource for FsHeaderSource {
    fn read(&self, relative_path: &str) -> Result<Option<String>, HeaderError> {
        let path = self.resolve(relative_path);
        if !path.is_file() {
            return Ok(None);
        }

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HeaderError::Io(e)),
        }
    }

    fn describe(&self, relative_path: &str) -> String {
        self.resolve(relative_path).display().to_string()
    }
}

/// Header text held in memory, keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct MemoryHeaderSource {
    headers: HashMap<String, String>,
}

impl MemoryHeaderSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, relative_path: &str, text: &str) -> Self {
        self.insert(relative_path, text);
        self
    }

    pub fn insert(&mut self, relative_path: &str, text: &str) {
        self.headers.insert(relative_path.to_string(), text.to_string());
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl HeaderSource for MemoryHeaderSource {
    fn read(&self, relative_path: &str) -> Result<Option<String>, HeaderError> {
        Ok(self.headers.get(relative_path).cloned())
    }
}
