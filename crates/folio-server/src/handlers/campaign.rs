//! Campaign join form.
//!
//! Submissions are acknowledged but neither stored nor forwarded. A body that
//! isn't a urlencoded form (multipart, empty, no content type) still gets the
//! confirmation, with every field treated as absent.

use axum::Form;
use axum::extract::rejection::FormRejection;
use serde::Deserialize;

use crate::page::Page;

/// Confirmation shown after a submission.
const CONFIRMATION: &str = "Thanks for joining the team, Hunter will reach out soon!";

/// Join form fields. All optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct JoinForm {
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
}

/// Handle GET /campaign/join.
pub(crate) async fn join_form() -> Page {
    Page::new("join.html").with("submitted", false)
}

/// Handle POST /campaign/join.
pub(crate) async fn submit_join(form: Result<Form<JoinForm>, FormRejection>) -> Page {
    let form = form.map_or_else(
        |rejection| {
            tracing::debug!(error = %rejection, "Join form body not decoded");
            JoinForm::default()
        },
        |Form(form)| form,
    );

    tracing::info!(
        name = form.name.as_deref().unwrap_or(""),
        role = form.role.as_deref().unwrap_or(""),
        has_email = form.email.as_deref().is_some_and(|e| !e.is_empty()),
        "Join form submitted"
    );

    Page::new("join.html")
        .with("submitted", true)
        .with("message", CONFIRMATION)
}
