//! Error page mapping.
//!
//! Every 4xx/5xx response leaving the router, whether raised by a handler,
//! a panic, or an axum rejection, is replaced by an `error.html` page
//! context with the original status kept.

use std::any::Any;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use folio_config::Mode;

use crate::error::{ErrorReport, ServerError};
use crate::page::Page;
use crate::state::AppState;

/// Placeholder shown instead of diagnostics.
const NO_TRACEBACK: &str = "N/A";

/// Replace failing responses with an error page.
pub(crate) async fn map_errors(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let detail = response
        .extensions()
        .get::<ErrorReport>()
        .map_or_else(|| fallback_detail(status), |report| report.detail.clone());

    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), error = %detail, "Request failed");
    } else {
        tracing::warn!(%method, %path, status = status.as_u16(), error = %detail, "Request rejected");
    }

    error_page(status, &detail, state.mode).into_response()
}

/// Build the error page context.
fn error_page(status: StatusCode, detail: &str, mode: Mode) -> (StatusCode, Page) {
    let traceback = if status == StatusCode::INTERNAL_SERVER_ERROR && mode.is_development() {
        detail
    } else {
        NO_TRACEBACK
    };

    let page = Page::new("error.html")
        .with("error_code", status.as_u16())
        .with("error_message", error_message(status))
        .with("traceback", traceback);

    (status, page)
}

/// Human-readable message per status.
fn error_message(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => {
            "The page you're looking for has vanished into a black hole.".to_owned()
        }
        StatusCode::FORBIDDEN => "You don't have clearance for this page.".to_owned(),
        StatusCode::INTERNAL_SERVER_ERROR => {
            "Our server encountered a glitch in the simulation.".to_owned()
        }
        other => format!("Error {} occurred.", other.as_u16()),
    }
}

/// Detail for responses produced outside our handlers (axum rejections).
fn fallback_detail(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), str::to_owned)
}

/// Convert a caught panic into an unexpected-error response.
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_owned()
    };

    ServerError::Unexpected(message).into_response()
}
