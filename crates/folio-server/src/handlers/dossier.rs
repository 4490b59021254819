//! Master dossier: every portfolio entry and class on one page.
//!
//! The `code` query value is compared to a shared literal. This hides the
//! page from casual visitors; it is not access control.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use folio_config::DenyWith;
use folio_data::DatasetName;

use crate::error::ServerError;
use crate::page::Page;
use crate::state::AppState;

/// Handle GET /master-dossier?code=...
pub(crate) async fn master_dossier(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Page, ServerError> {
    if !state.dossier.admits(params.get("code").map(String::as_str)) {
        // The supplied code stays out of errors and logs.
        return Err(match state.dossier.deny_with {
            DenyWith::NotFound => {
                ServerError::Status(StatusCode::NOT_FOUND, "Dossier code rejected".to_owned())
            }
            DenyWith::Forbidden => ServerError::Forbidden("dossier code rejected".to_owned()),
        });
    }

    let portfolio = state.loader.load(DatasetName::Portfolio)?;
    let academics = state.loader.load(DatasetName::Academics)?;

    Ok(Page::new("master_dossier.html")
        .with("title", "Master Dossier")
        .with("entries", portfolio.to_value())
        .with("classes", academics.to_value()))
}
