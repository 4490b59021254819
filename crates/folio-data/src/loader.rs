//! Dataset loading from storage.
//!
//! Provides [`DatasetLoader`], which reads and decodes a dataset on every
//! call. Nothing is cached: concurrent requests each get their own copy,
//! and edits to the files are visible on the next request.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use folio_storage::Storage;
use serde_json::Value;

use crate::catalog::{Catalog, MissingPolicy};
use crate::dataset::{Dataset, DatasetName, Record};
use crate::error::DataError;
use crate::quiz::{QuizKey, is_safe_segment};

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Reads datasets, course documents, and quiz documents.
pub struct DatasetLoader {
    storage: Arc<dyn Storage>,
    catalog: Catalog,
    missing: MissingPolicy,
}

impl DatasetLoader {
    /// Create a loader that fails on missing dataset files.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, catalog: Catalog) -> Self {
        Self {
            storage,
            catalog,
            missing: MissingPolicy::Fail,
        }
    }

    /// Set the missing-file policy.
    #[must_use]
    pub fn with_missing_policy(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Missing-file policy in effect.
    #[must_use]
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }

    /// Load and decode a dataset.
    ///
    /// # Errors
    ///
    /// - [`DataError::DatasetNotFound`] if the file is absent and the policy is
    ///   [`MissingPolicy::Fail`]
    /// - [`DataError::DatasetCorrupt`] if the file is not valid JSON
    /// - [`DataError::DatasetShape`] if the document breaks the shape contract
    pub fn load(&self, name: DatasetName) -> Result<Dataset, DataError> {
        let start = Instant::now();
        let path = self.catalog.path(name);

        let document = match self.read_json(path) {
            Ok(document) => document,
            Err(DataError::DatasetNotFound { path }) if self.missing == MissingPolicy::Empty => {
                tracing::warn!(
                    dataset = %name,
                    path = %path.display(),
                    "Dataset file missing, serving empty dataset"
                );
                return Ok(Dataset::empty(name));
            }
            Err(e) => return Err(e),
        };

        let dataset = Dataset::decode(name, document).map_err(|reason| DataError::DatasetShape {
            path: self.storage.locate(path),
            reason,
        })?;

        tracing::debug!(
            dataset = %name,
            records = dataset.len(),
            elapsed_ms = elapsed_ms(start),
            "Loaded dataset"
        );

        Ok(dataset)
    }

    /// Load one course document.
    ///
    /// # Errors
    ///
    /// - [`DataError::RecordNotFound`] if the course number is unsafe or has no document
    /// - [`DataError::DatasetCorrupt`] if the document is not valid JSON
    /// - [`DataError::DatasetShape`] if the document is not an object
    pub fn course(&self, course_num: &str) -> Result<Record, DataError> {
        if !is_safe_segment(course_num) {
            return Err(DataError::record_not_found("course", course_num));
        }
        let path = self.catalog.course_path(course_num);

        match self.read_json(&path) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(_) => Err(DataError::DatasetShape {
                path: self.storage.locate(&path),
                reason: "course document should be an object".to_owned(),
            }),
            Err(DataError::DatasetNotFound { .. }) => {
                Err(DataError::record_not_found("course", course_num))
            }
            Err(e) => Err(e),
        }
    }

    /// Read a quiz document verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::RecordNotFound`] if the document is absent.
    pub fn quiz(&self, key: &QuizKey) -> Result<Vec<u8>, DataError> {
        let path = self.catalog.quiz_dir(key.course()).join(key.file_name());

        self.storage.read(&path).map_err(|e| {
            if e.is_not_found() {
                DataError::record_not_found("quiz", key.to_string())
            } else {
                DataError::Storage(e)
            }
        })
    }

    /// Weeks that have a quiz document for a course, sorted by name.
    ///
    /// A course without a quiz directory has no weeks.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Storage`] if the directory exists but can't be read.
    pub fn quiz_weeks(&self, course: &str) -> Result<Vec<String>, DataError> {
        if !is_safe_segment(course) {
            return Ok(Vec::new());
        }

        match self.storage.list(&self.catalog.quiz_dir(course), "json") {
            Ok(weeks) => Ok(weeks),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(DataError::Storage(e)),
        }
    }

    /// Read and parse a JSON file.
    fn read_json(&self, path: &Path) -> Result<Value, DataError> {
        let bytes = self.storage.read(path).map_err(|e| {
            if e.is_not_found() {
                DataError::DatasetNotFound {
                    path: self.storage.locate(path),
                }
            } else {
                DataError::Storage(e)
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|source| DataError::DatasetCorrupt {
            path: self.storage.locate(path),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio_storage::MockStorage;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn loader(storage: MockStorage) -> DatasetLoader {
        DatasetLoader::new(Arc::new(storage), Catalog::default())
    }

    #[test]
    fn test_load_projects() {
        let loader = loader(MockStorage::new().with_file(
            "projects.json",
            r#"{"alpha": {"title": "Alpha", "tags": ["rust"]}}"#,
        ));

        let dataset = loader.load(DatasetName::Projects).unwrap();

        assert_eq!(dataset.name(), DatasetName::Projects);
        assert_eq!(dataset.find("alpha").unwrap()["tags"], json!(["rust"]));
    }

    #[test]
    fn test_load_wrapped_and_bare_academics() {
        let wrapped = loader(
            MockStorage::new().with_file("academics.json", r#"{"classes": [{"name": "OS"}]}"#),
        )
        .load(DatasetName::Academics)
        .unwrap();
        let bare = loader(MockStorage::new().with_file("academics.json", r#"[{"name": "OS"}]"#))
            .load(DatasetName::Academics)
            .unwrap();

        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_load_missing_fails_by_default() {
        let err = loader(MockStorage::new())
            .load(DatasetName::Portfolio)
            .unwrap_err();

        match err {
            DataError::DatasetNotFound { path } => {
                assert_eq!(path, PathBuf::from("portfolio_data.json"));
            }
            other => panic!("expected DatasetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_with_empty_policy() {
        let loader = loader(MockStorage::new()).with_missing_policy(MissingPolicy::Empty);

        let dataset = loader.load(DatasetName::Portfolio).unwrap();

        assert!(dataset.is_empty());
        assert_eq!(loader.missing_policy(), MissingPolicy::Empty);
    }

    #[test]
    fn test_load_corrupt_fails_even_with_empty_policy() {
        let loader = loader(MockStorage::new().with_file("academics.json", "[{"))
            .with_missing_policy(MissingPolicy::Empty);

        let err = loader.load(DatasetName::Academics).unwrap_err();

        assert!(matches!(err, DataError::DatasetCorrupt { .. }), "{err:?}");
    }

    #[test]
    fn test_load_wrong_shape() {
        let err = loader(MockStorage::new().with_file("projects.json", "[]"))
            .load(DatasetName::Projects)
            .unwrap_err();

        match err {
            DataError::DatasetShape { path, reason } => {
                assert_eq!(path, PathBuf::from("projects.json"));
                assert_eq!(reason, "expected an object, found an array");
            }
            other => panic!("expected DatasetShape, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rereads_every_call() {
        let storage = Arc::new(MockStorage::new().with_file("academics.json", "[{}]"));
        let shared: Arc<dyn Storage> = Arc::<MockStorage>::clone(&storage);
        let loader = DatasetLoader::new(shared, Catalog::default());

        assert_eq!(loader.load(DatasetName::Academics).unwrap().len(), 1);

        storage.remove("academics.json");

        assert!(matches!(
            loader.load(DatasetName::Academics),
            Err(DataError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_course() {
        let loader = loader(
            MockStorage::new()
                .with_file("courses/101.json", r#"{"name": "Intro", "weeks": 15}"#)
                .with_file("courses/102.json", "[]")
                .with_file("courses/103.json", "{"),
        );

        assert_eq!(loader.course("101").unwrap()["name"], "Intro");
        assert!(matches!(
            loader.course("102"),
            Err(DataError::DatasetShape { .. })
        ));
        assert!(matches!(
            loader.course("103"),
            Err(DataError::DatasetCorrupt { .. })
        ));
        assert!(matches!(
            loader.course("999"),
            Err(DataError::RecordNotFound { .. })
        ));
        assert!(matches!(
            loader.course(".."),
            Err(DataError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_quiz_returns_exact_bytes() {
        let raw = "{ \"questions\" : [ 1,2 ] }\n";
        let loader = loader(MockStorage::new().with_file("static/courses/101/week1.json", raw));
        let key = QuizKey::new("101", "week1").unwrap();

        assert_eq!(loader.quiz(&key).unwrap(), raw.as_bytes());
    }

    #[test]
    fn test_quiz_missing() {
        let loader = loader(MockStorage::new());
        let key = QuizKey::new("101", "week9").unwrap();

        let err = loader.quiz(&key).unwrap_err();

        assert_eq!(err.to_string(), "No quiz matches '101/week9'");
    }

    #[test]
    fn test_quiz_weeks() {
        let loader = loader(
            MockStorage::new()
                .with_file("static/courses/101/week2.json", "{}")
                .with_file("static/courses/101/week1.json", "{}"),
        );

        assert_eq!(
            loader.quiz_weeks("101").unwrap(),
            vec!["week1".to_owned(), "week2".to_owned()]
        );
        assert!(loader.quiz_weeks("202").unwrap().is_empty());
        assert!(loader.quiz_weeks("..").unwrap().is_empty());
    }
}
