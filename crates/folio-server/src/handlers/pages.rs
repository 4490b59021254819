//! Static pages: templates rendered with a fixed context.

use crate::page::Page;

/// Handle GET /.
pub(crate) async fn index() -> Page {
    Page::new("index.html").with("title", "Home")
}

/// Handle GET /linktree.
pub(crate) async fn linktree() -> Page {
    Page::new("linktree.html").with("title", "Links")
}

/// Handle GET /campaign.
pub(crate) async fn campaign() -> Page {
    Page::new("campaign.html")
}

/// Handle GET /resume.
pub(crate) async fn resume() -> Page {
    Page::new("resume.html")
}

/// Handle GET /editor.
pub(crate) async fn editor() -> Page {
    Page::new("description_editor.html")
}
