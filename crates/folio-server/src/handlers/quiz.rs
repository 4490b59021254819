//! Quiz shell page and raw quiz documents.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use folio_data::{DataError, QuizKey};
use md5::{Digest, Md5};

use super::path_params;
use crate::error::ServerError;
use crate::page::Page;
use crate::state::AppState;

/// Handle GET /quiz/{course}/{week}.
///
/// The page only names the quiz; the front end fetches the document itself,
/// so the shell renders whether or not that document exists.
pub(crate) async fn quiz_page(
    uri: Uri,
    params: Result<Path<(String, String)>, PathRejection>,
) -> Result<Page, ServerError> {
    let (course, week) = path_params(params, "quiz", &uri)?;

    Ok(Page::new("quiz.html")
        .with("course", course)
        .with("week", week))
}

/// Handle GET /api/quiz/{course}/{week}.
///
/// Returns the stored document byte for byte.
pub(crate) async fn get_quiz(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    params: Result<Path<(String, String)>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let (course, week) = path_params(params, "quiz", &uri)?;
    let key = QuizKey::new(&course, &week)
        .ok_or_else(|| DataError::record_not_found("quiz", format!("{course}/{week}")))?;
    let content = state.loader.quiz(&key)?;

    let etag = compute_etag(&content);

    if headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .any(|value| etag_matches(value, &etag))
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        content,
    )
        .into_response())
}

/// Compute `ETag` from document content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(content: &[u8]) -> String {
    let hash = Md5::digest(content);
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Whether an `If-None-Match` value names `etag`.
///
/// Handles `*`, comma-separated lists and weak (`W/`) tags, compared weakly.
fn etag_matches(if_none_match: &HeaderValue, etag: &str) -> bool {
    let Ok(value) = if_none_match.to_str() else {
        return false;
    };

    value.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag(b"{}");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_compute_etag_tracks_content() {
        assert_eq!(compute_etag(b"{\"a\": 1}"), compute_etag(b"{\"a\": 1}"));
        assert_ne!(compute_etag(b"{\"a\": 1}"), compute_etag(b"{\"a\":1}"));
    }

    #[test]
    fn test_etag_matches_header_forms() {
        let etag = "\"0123456789abcdef\"";
        let matches = |value: &'static str| etag_matches(&HeaderValue::from_static(value), etag);

        assert!(matches("\"0123456789abcdef\""));
        assert!(matches("W/\"0123456789abcdef\""));
        assert!(matches("\"other\", W/\"0123456789abcdef\""));
        assert!(matches("*"));
        assert!(!matches("\"other\""));
        assert!(!matches("0123456789abcdef"));
        assert!(!matches(""));
    }
}
