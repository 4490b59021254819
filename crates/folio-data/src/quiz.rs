//! Quiz document keys.

use std::fmt;
use std::path::PathBuf;

/// Whether a URL segment can safely name a file or directory.
///
/// Rejects empty segments, separators, and anything starting with `.`
/// (hidden files, `.` and `..`).
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('.')
        && !segment.contains(['/', '\\', '\0'])
}

/// A course/week pair naming one quiz document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizKey {
    course: String,
    week: String,
}

impl QuizKey {
    /// Build a key from two URL segments.
    ///
    /// Returns `None` if either segment is unsafe.
    #[must_use]
    pub fn new(course: &str, week: &str) -> Option<Self> {
        (is_safe_segment(course) && is_safe_segment(week)).then(|| Self {
            course: course.to_owned(),
            week: week.to_owned(),
        })
    }

    /// Course identifier.
    #[must_use]
    pub fn course(&self) -> &str {
        &self.course
    }

    /// Week identifier.
    #[must_use]
    pub fn week(&self) -> &str {
        &self.week
    }

    /// File name within the course's quiz directory.
    pub(crate) fn file_name(&self) -> PathBuf {
        PathBuf::from(format!("{}.json", self.week))
    }
}

impl fmt::Display for QuizKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.course, self.week)
    }
}
