//! Read-only file access for the Folio site root.
//!
//! This crate provides a [`Storage`] trait that hides where site data lives.
//! Every path handed to a [`Storage`] is relative to the site root, which is
//! fixed once when the backend is constructed.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()` and `list()` methods
//! - [`FsStorage`] implementation anchored at an absolute root directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use folio_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("/srv/site"));
//! let bytes = storage.read(Path::new("projects.json"))?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
