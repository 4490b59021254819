//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError};

const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores file contents in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use folio_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_file("projects.json", r#"{"a": {}}"#);
///
/// let bytes = storage.read(Path::new("projects.json")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Remove a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove(&self, path: impl AsRef<Path>) {
        self.files.write().unwrap().remove(path.as_ref());
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(BACKEND, path))
    }

    fn list(&self, dir: &Path, extension: &str) -> Result<Vec<String>, StorageError> {
        let files = self.files.read().unwrap();
        let stems: Vec<String> = files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| p.extension().is_some_and(|ext| ext == extension))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();

        if stems.is_empty() && !files.keys().any(|p| p.starts_with(dir)) {
            return Err(StorageError::not_found(BACKEND, dir));
        }

        Ok(stems)
    }
}
