//! Dataset loading and record lookup for Folio.
//!
//! This crate provides:
//! - [`DatasetLoader`]: reads a named JSON dataset from [`Storage`] on every call
//! - [`Dataset`]: a decoded dataset with one fixed shape and identifier strategy
//! - [`QuizKey`]: validated course/week pair for raw quiz documents
//!
//! # Shape Contracts
//!
//! | Dataset | Shape | Identifier |
//! |---|---|---|
//! | `projects` | mapping id → record | mapping key |
//! | `portfolio` | sequence (bare or `{"entries": [...]}`) | slug of `title` |
//! | `academics` | sequence (bare or `{"classes": [...]}`) | position |
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use folio_data::{Catalog, DatasetLoader, DatasetName};
//! use folio_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("/srv/site")));
//! let loader = DatasetLoader::new(storage, Catalog::default());
//!
//! let portfolio = loader.load(DatasetName::Portfolio)?;
//! let entry = portfolio.find("space-and-time");
//! ```
//!
//! [`Storage`]: folio_storage::Storage

mod catalog;
mod dataset;
mod error;
mod loader;
mod quiz;
mod slug;

pub use catalog::{Catalog, MissingPolicy};
pub use dataset::{Dataset, DatasetName, Entry, Identifier, Record, Shape};
pub use error::DataError;
pub use loader::DatasetLoader;
pub use quiz::{QuizKey, is_safe_segment};
pub use slug::title_to_slug;
