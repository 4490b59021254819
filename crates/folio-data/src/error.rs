//! Data loading errors.

use std::path::PathBuf;

use folio_storage::StorageError;

/// Error returned by [`DatasetLoader`](crate::DatasetLoader).
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Dataset file is absent.
    #[error("Dataset file is missing: {}", .path.display())]
    DatasetNotFound {
        /// Attempted absolute path.
        path: PathBuf,
    },
    /// Dataset file is not valid JSON.
    #[error("Dataset {} is not valid JSON", .path.display())]
    DatasetCorrupt {
        /// Absolute path of the file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Dataset file is valid JSON but does not match its shape contract.
    #[error("Dataset {} has an unexpected shape: {reason}", .path.display())]
    DatasetShape {
        /// Absolute path of the file.
        path: PathBuf,
        /// What did not match.
        reason: String,
    },
    /// No record matches the requested identifier.
    #[error("No {kind} matches '{id}'")]
    RecordNotFound {
        /// What was looked up (e.g., "portfolio", "course", "quiz").
        kind: String,
        /// Requested identifier.
        id: String,
    },
    /// Any other storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DataError {
    /// Create a record-not-found error.
    pub fn record_not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }
}
