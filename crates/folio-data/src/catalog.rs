//! Dataset file locations and the missing-file policy.

use std::path::{Path, PathBuf};

use crate::dataset::DatasetName;

/// Where each dataset lives, relative to the site root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    /// Projects document.
    pub projects: PathBuf,
    /// Portfolio document.
    pub portfolio: PathBuf,
    /// Academics document.
    pub academics: PathBuf,
    /// Directory of per-course documents (`<course_num>.json`).
    pub courses_dir: PathBuf,
    /// Directory of quiz documents (`<course>/<week>.json`).
    pub quizzes_dir: PathBuf,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            projects: PathBuf::from("projects.json"),
            portfolio: PathBuf::from("portfolio_data.json"),
            academics: PathBuf::from("academics.json"),
            courses_dir: PathBuf::from("courses"),
            quizzes_dir: PathBuf::from("static/courses"),
        }
    }
}

impl Catalog {
    /// File holding the named dataset.
    #[must_use]
    pub fn path(&self, name: DatasetName) -> &Path {
        match name {
            DatasetName::Projects => &self.projects,
            DatasetName::Portfolio => &self.portfolio,
            DatasetName::Academics => &self.academics,
        }
    }

    /// File holding one course document.
    #[must_use]
    pub fn course_path(&self, course_num: &str) -> PathBuf {
        self.courses_dir.join(format!("{course_num}.json"))
    }

    /// Directory holding one course's quizzes.
    #[must_use]
    pub fn quiz_dir(&self, course: &str) -> PathBuf {
        self.quizzes_dir.join(course)
    }
}

/// What to do when a dataset file is absent.
///
/// Applies to every dataset alike. Corrupt files always fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Report [`DataError::DatasetNotFound`](crate::DataError::DatasetNotFound).
    #[default]
    Fail,
    /// Substitute the dataset's empty value and log a warning.
    Empty,
}
