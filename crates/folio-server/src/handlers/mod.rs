//! HTTP request handlers.
//!
//! Each handler answers with a [`Page`](crate::page::Page) or a
//! [`ServerError`](crate::error::ServerError); failures are turned into
//! error pages by the error page middleware.

pub(crate) mod campaign;
pub(crate) mod course;
pub(crate) mod datasets;
pub(crate) mod dossier;
pub(crate) mod pages;
pub(crate) mod quiz;

use axum::extract::Path;
use axum::extract::rejection::PathRejection;
use axum::http::Uri;
use folio_data::DataError;

use crate::error::ServerError;

/// Fallback for paths no route matches.
pub(crate) async fn route_not_found(uri: Uri) -> ServerError {
    ServerError::RouteNotFound(uri.path().to_owned())
}

/// Unwrap path parameters, treating undecodable ones as a missing record.
///
/// A segment such as `%FF` is not valid UTF-8 and cannot name any record, so
/// it gets the same not-found page as an unknown identifier.
pub(crate) fn path_params<T>(
    path: Result<Path<T>, PathRejection>,
    kind: &str,
    uri: &Uri,
) -> Result<T, DataError> {
    path.map(|Path(params)| params).map_err(|rejection| {
        tracing::debug!(path = uri.path(), error = %rejection, "Undecodable path parameters");
        let raw = uri.path().rsplit('/').next().unwrap_or_default();
        DataError::record_not_found(kind, raw)
    })
}
