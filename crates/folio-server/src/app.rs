//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, campaign, course, datasets, dossier, pages, quiz};
use crate::middleware::{error_pages, security};
use crate::state::AppState;

/// Create the application router.
///
/// Layers, outermost first: security headers, request tracing, error pages,
/// panic catching.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/linktree", get(pages::linktree))
        .route("/campaign", get(pages::campaign))
        .route(
            "/campaign/join",
            get(campaign::join_form).post(campaign::submit_join),
        )
        .route("/resume", get(pages::resume))
        .route("/editor", get(pages::editor));

    let dataset_routes = Router::new()
        .route("/projects", get(datasets::list_projects))
        .route("/projects/{id}", get(datasets::project_detail))
        .route("/portfolio", get(datasets::list_portfolio))
        .route("/portfolio/{slug}", get(datasets::portfolio_detail))
        .route("/academics", get(datasets::list_academics))
        .route("/academics/{index}", get(datasets::academic_detail))
        .route("/master-dossier", get(dossier::master_dossier));

    let course_routes = Router::new()
        .route("/course/{course_num}", get(course::course_page))
        .route("/quiz/{course}/{week}", get(quiz::quiz_page))
        .route("/api/quiz/{course}/{week}", get(quiz::get_quiz));

    Router::new()
        .merge(page_routes)
        .merge(dataset_routes)
        .merge(course_routes)
        .fallback(handlers::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(from_fn_with_state(
                    Arc::clone(&state),
                    error_pages::map_errors,
                ))
                .layer(CatchPanicLayer::custom(error_pages::panic_response)),
        )
        .with_state(state)
}

/// Request span without the query string, which may carry the dossier code.
fn request_span(request: &Request) -> tracing::Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}
