//! Page contexts.
//!
//! Every site page is answered with a template tag and the variables the
//! front end renders it with:
//!
//! ```json
//! {"template": "projects.html", "context": {"title": "Projects", "items": []}}
//! ```

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

/// Template tag plus template variables.
#[derive(Debug, Serialize)]
pub(crate) struct Page {
    template: &'static str,
    context: Map<String, Value>,
}

impl Page {
    /// Page with an empty context.
    pub(crate) fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Map::new(),
        }
    }

    /// Set a context variable.
    #[must_use]
    pub(crate) fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.context.insert(key.to_owned(), value.into());
        self
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_page_serialization() {
        let page = Page::new("index.html").with("title", "Home");

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"template": "index.html", "context": {"title": "Home"}})
        );
    }

    #[test]
    fn test_with_overwrites_and_keeps_order() {
        let page = Page::new("join.html")
            .with("submitted", false)
            .with("message", Value::Null)
            .with("submitted", true);

        let keys: Vec<_> = page.context.keys().cloned().collect();
        assert_eq!(keys, vec!["submitted".to_owned(), "message".to_owned()]);
        assert_eq!(page.context["submitted"], json!(true));
    }
}
