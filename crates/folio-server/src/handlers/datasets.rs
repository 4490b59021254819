//! Dataset list and detail pages.
//!
//! List pages carry `title` and `items` (`[{"id", "record"}]` in document
//! order). Detail pages carry the requested `id` and the matching `record`.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::Uri;
use folio_data::{DataError, Dataset, DatasetName};
use serde_json::{Value, json};

use super::path_params;
use crate::error::ServerError;
use crate::page::Page;
use crate::state::AppState;

/// Handle GET /projects.
///
/// The mapping is also exposed verbatim as `projects`.
pub(crate) async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Page, ServerError> {
    let dataset = state.loader.load(DatasetName::Projects)?;

    Ok(list_page("projects.html", "Projects", &dataset).with("projects", dataset.to_value()))
}

/// Handle GET /projects/{id}.
pub(crate) async fn project_detail(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    id: Result<Path<String>, PathRejection>,
) -> Result<Page, ServerError> {
    let id = path_params(id, DatasetName::Projects.as_str(), &uri)?;
    detail_page(&state, DatasetName::Projects, "project_detail.html", &id)
}

/// Handle GET /portfolio.
pub(crate) async fn list_portfolio(
    State(state): State<Arc<AppState>>,
) -> Result<Page, ServerError> {
    let dataset = state.loader.load(DatasetName::Portfolio)?;

    Ok(list_page("portfolio.html", "Portfolio", &dataset).with("entries", dataset.to_value()))
}

/// Handle GET /portfolio/{slug}.
pub(crate) async fn portfolio_detail(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    slug: Result<Path<String>, PathRejection>,
) -> Result<Page, ServerError> {
    let slug = path_params(slug, DatasetName::Portfolio.as_str(), &uri)?;
    detail_page(&state, DatasetName::Portfolio, "portfolio_detail.html", &slug)
}

/// Handle GET /academics.
pub(crate) async fn list_academics(
    State(state): State<Arc<AppState>>,
) -> Result<Page, ServerError> {
    let dataset = state.loader.load(DatasetName::Academics)?;

    Ok(list_page("academics.html", "Academics", &dataset).with("classes", dataset.to_value()))
}

/// Handle GET /academics/{index}.
pub(crate) async fn academic_detail(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    index: Result<Path<String>, PathRejection>,
) -> Result<Page, ServerError> {
    let index = path_params(index, DatasetName::Academics.as_str(), &uri)?;
    detail_page(&state, DatasetName::Academics, "academic_detail.html", &index)
}

fn list_page(template: &'static str, title: &str, dataset: &Dataset) -> Page {
    Page::new(template)
        .with("title", title)
        .with("items", json!(dataset.entries()))
}

fn detail_page(
    state: &AppState,
    name: DatasetName,
    template: &'static str,
    id: &str,
) -> Result<Page, ServerError> {
    let dataset = state.loader.load(name)?;
    let record = dataset
        .find(id)
        .ok_or_else(|| DataError::record_not_found(name.as_str(), id))?;

    let title = record.get("title").cloned().unwrap_or(Value::Null);
    Ok(Page::new(template)
        .with("title", title)
        .with("id", id)
        .with("record", record.clone()))
}
