//! Course pages.

use std::sync::Arc;

use axum::extract::{Path, State};

use crate::error::ServerError;
use crate::page::Page;
use crate::state::AppState;

/// Handle GET /course/{course_num}.
///
/// Carries the course document and the weeks that have a quiz.
pub(crate) async fn course_page(
    State(state): State<Arc<AppState>>,
    Path(course_num): Path<String>,
) -> Result<Page, ServerError> {
    let course = state.loader.course(&course_num)?;
    let weeks = state.loader.quiz_weeks(&course_num)?;

    let title = course.get("title").or_else(|| course.get("name")).cloned();
    Ok(Page::new("course.html")
        .with("title", title.unwrap_or_else(|| course_num.clone().into()))
        .with("course_num", course_num)
        .with("course", course)
        .with("quiz_weeks", weeks))
}
