//! Error types for the HTTP server.
//!
//! Handlers return [`ServerError`]. Its response carries only a status and an
//! [`ErrorReport`] extension; the error page itself is produced by
//! [`crate::middleware::error_pages`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_data::DataError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Dataset, course, or quiz failure.
    #[error(transparent)]
    Data(#[from] DataError),

    /// No route matches the request path.
    #[error("No route matches {0}")]
    RouteNotFound(String),

    /// Access refused.
    #[error("Access refused: {0}")]
    Forbidden(String),

    /// Explicitly raised HTTP fault.
    #[error("{1}")]
    Status(StatusCode, String),

    /// Anything else, including handler panics.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ServerError {
    /// HTTP status for this error.
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::Data(DataError::RecordNotFound { .. }) | Self::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Data(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Status(status, _) => *status,
        }
    }
}

/// Failure detail attached to an error response for the error page mapper.
#[derive(Clone, Debug)]
pub(crate) struct ErrorReport {
    /// Full error chain.
    pub(crate) detail: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response.extensions_mut().insert(ErrorReport {
            detail: error_chain(&self),
        });
        response
    }
}

/// Render an error and its sources as one line.
///
/// A source whose text is already part of the line is skipped.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !chain.contains(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = cause.source();
    }

    chain
}
