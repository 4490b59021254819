//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading site files from the local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// All reads are anchored at `root`, which is resolved once by the caller.
/// Paths that try to climb out of the root are rejected.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use folio_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("/srv/site"));
/// let bytes = storage.read(Path::new("academics.json"))?;
/// ```
pub struct FsStorage {
    /// Site root directory.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage anchored at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Site root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path doesn't escape the root directory.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`), e.g. `../../../etc/passwd`.
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            return Err(StorageError::invalid_path(BACKEND, path));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.root.join(path);
        tracing::debug!(path = %full_path.display(), "Reading file");
        fs::read(&full_path)
            .map_err(|e| StorageError::io(BACKEND, &full_path, e))
    }

    fn list(&self, dir: &Path, extension: &str) -> Result<Vec<String>, StorageError> {
        Self::validate_path(dir)?;
        let full_path = self.root.join(dir);
        let entries = fs::read_dir(&full_path)
            .map_err(|e| StorageError::io(BACKEND, &full_path, e))?;

        let mut stems: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == extension))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|stem| !stem.starts_with('.'))
            .collect();
        stems.sort();

        Ok(stems)
    }

    fn locate(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_read_existing_file() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("projects.json"), b"{\"a\": {}}").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let bytes = storage.read(Path::new("projects.json")).unwrap();

        assert_eq!(bytes, b"{\"a\": {}}".to_vec());
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read(Path::new("projects.json")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, "Fs");
        assert_eq!(err.path, temp_dir.path().join("projects.json"));
    }

    #[test]
    fn test_read_rejects_parent_dir() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read(Path::new("../etc/passwd")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_read_rejects_absolute_path() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read(Path::new("/etc/passwd")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_list_filters_by_extension_and_sorts() {
        let temp_dir = create_test_dir();
        let dir = temp_dir.path().join("static/courses/101");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("week2.json"), "{}").unwrap();
        fs::write(dir.join("week1.json"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join(".hidden.json"), "{}").unwrap();
        fs::create_dir(dir.join("drafts.json")).unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let stems = storage
            .list(Path::new("static/courses/101"), "json")
            .unwrap();

        assert_eq!(stems, vec!["week1".to_owned(), "week2".to_owned()]);
    }

    #[test]
    fn test_list_missing_dir_is_not_found() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.list(Path::new("static/courses/999"), "json").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_locate_joins_root() {
        let storage = FsStorage::new(PathBuf::from("/srv/site"));

        assert_eq!(
            storage.locate(Path::new("projects.json")),
            PathBuf::from("/srv/site/projects.json")
        );
    }
}
