//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for reading site files,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are relative to the site root:
//! - `"projects.json"` - a dataset at the root
//! - `"courses/101.json"` - a per-course document
//! - `"static/courses/101"` - a directory of quiz documents

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why a storage access failed, independent of backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No file or directory at the path.
    NotFound,
    /// The process may not read the path.
    PermissionDenied,
    /// The path is absolute or climbs out of the site root.
    InvalidPath,
    /// Any other I/O failure.
    Other,
}

impl StorageErrorKind {
    fn of_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "no such file",
            Self::PermissionDenied => "permission denied",
            Self::InvalidPath => "outside the site root",
            Self::Other => "unreadable",
        }
    }
}

/// A failed read of a site file or directory.
#[derive(Debug)]
pub struct StorageError {
    /// Failure category.
    pub kind: StorageErrorKind,
    /// Path the backend was asked for, as the backend resolved it.
    pub path: PathBuf,
    /// Backend name ("Fs", "Mock").
    pub backend: &'static str,
    cause: Option<io::Error>,
}

impl StorageError {
    /// Nothing stored at `path`.
    #[must_use]
    pub fn not_found(backend: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::of_kind(StorageErrorKind::NotFound, backend, path)
    }

    /// `path` may not be resolved against the site root.
    #[must_use]
    pub fn invalid_path(backend: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::of_kind(StorageErrorKind::InvalidPath, backend, path)
    }

    /// Wrap an I/O failure, keeping it as the error source.
    #[must_use]
    pub fn io(backend: &'static str, path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self {
            kind: StorageErrorKind::of_io(&err),
            path: path.into(),
            backend,
            cause: Some(err),
        }
    }

    fn of_kind(kind: StorageErrorKind, backend: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            backend,
            cause: None,
        }
    }

    /// Whether the error means the file is simply absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} storage)",
            self.path.display(),
            self.kind.describe(),
            self.backend
        )
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

/// Read-only access to files under the site root.
///
/// Implementations resolve root-relative paths to their own storage format.
/// Nothing is cached: every call observes the current state of the backend.
pub trait Storage: Send + Sync {
    /// Read the full contents of a file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the site root (e.g., "projects.json")
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError>;

    /// List file stems in a directory whose names end with `.{extension}`.
    ///
    /// Stems are returned sorted. Subdirectories are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory doesn't exist or can't be read.
    fn list(&self, dir: &Path, extension: &str) -> Result<Vec<String>, StorageError>;

    /// Absolute location of a path, for diagnostics.
    fn locate(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}
