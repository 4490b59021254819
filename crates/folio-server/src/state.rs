//! Application state.
//!
//! Shared, read-only state for all request handlers.

use folio_config::{DenyWith, Mode};
use folio_data::DatasetLoader;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Dataset loader rooted at the site directory.
    pub(crate) loader: DatasetLoader,
    /// Run mode (error pages show detail only in development).
    pub(crate) mode: Mode,
    /// Master dossier gate.
    pub(crate) dossier: DossierGate,
}

/// Expected code and refusal status for the master dossier.
pub(crate) struct DossierGate {
    pub(crate) code: String,
    pub(crate) deny_with: DenyWith,
}

impl DossierGate {
    /// Whether the supplied code opens the dossier.
    pub(crate) fn admits(&self, supplied: Option<&str>) -> bool {
        supplied == Some(self.code.as_str())
    }
}
