//! HTTP server for the Folio portfolio site.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - Page contexts (template tag + variables) for every site page
//! - Raw quiz documents under `/api/quiz`
//! - Error page contexts for every failure, produced in one place
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         root: PathBuf::from("/srv/site"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► NormalizePath (trim trailing slash)
//!                        │
//!                        └─► Router ──► error pages ──► catch panic ──► handler
//!                                                                         │
//!                                                                         └─► DatasetLoader ──► FsStorage
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod page;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::ServiceExt;
use axum::extract::Request;
use folio_config::{DenyWith, MissingDatasets, Mode};
use folio_data::{Catalog, DatasetLoader, MissingPolicy};
use folio_storage::FsStorage;
use state::{AppState, DossierGate};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// The complete application service: the router behind trailing-slash
/// normalization.
pub type App = NormalizePath<Router>;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Absolute site root; every dataset path resolves against it.
    pub root: PathBuf,
    /// Dataset locations relative to `root`.
    pub catalog: Catalog,
    /// What to do when a dataset file is absent.
    pub missing_datasets: MissingPolicy,
    /// Run mode (controls diagnostic detail on error pages).
    pub mode: Mode,
    /// Expected master dossier code.
    pub dossier_code: String,
    /// Status for a wrong dossier code.
    pub dossier_deny_with: DenyWith,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            root: PathBuf::from("."),
            catalog: Catalog::default(),
            missing_datasets: MissingPolicy::Fail,
            mode: Mode::Development,
            dossier_code: "utsa2026".to_owned(),
            dossier_deny_with: DenyWith::NotFound,
        }
    }
}

/// Build the application service.
///
/// Used by [`run_server`] and by tests that drive the app without a socket.
#[must_use]
pub fn create_app(config: &ServerConfig) -> App {
    let storage = Arc::new(FsStorage::new(config.root.clone()));
    let loader = DatasetLoader::new(storage, config.catalog.clone())
        .with_missing_policy(config.missing_datasets);

    let state = Arc::new(AppState {
        loader,
        mode: config.mode,
        dossier: DossierGate {
            code: config.dossier_code.clone(),
            deny_with: config.dossier_deny_with,
        },
    });

    NormalizePathLayer::trim_trailing_slash().layer(app::create_router(state))
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(&config);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        root = %config.root.display(),
        mode = ?config.mode,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
///
/// # Arguments
///
/// * `config` - Folio configuration
#[must_use]
pub fn server_config_from_folio_config(config: &folio_config::Config) -> ServerConfig {
    let datasets = &config.datasets;

    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        root: config.site_resolved.root.clone(),
        catalog: Catalog {
            projects: PathBuf::from(&datasets.projects),
            portfolio: PathBuf::from(&datasets.portfolio),
            academics: PathBuf::from(&datasets.academics),
            courses_dir: PathBuf::from(&datasets.courses_dir),
            quizzes_dir: PathBuf::from(&datasets.quizzes_dir),
        },
        missing_datasets: match config.site_resolved.missing_datasets {
            MissingDatasets::Fail => MissingPolicy::Fail,
            MissingDatasets::Empty => MissingPolicy::Empty,
        },
        mode: config.server.mode,
        dossier_code: config.dossier.code.clone(),
        dossier_deny_with: config.dossier.deny_with,
    }
}
