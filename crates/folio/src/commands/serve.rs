//! `folio serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config, MissingDatasets, Mode};
use folio_server::{run_server, server_config_from_folio_config};

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root holding the dataset files (overrides config).
    #[arg(short, long, env = "FOLIO_ROOT")]
    root: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Hide diagnostics on error pages.
    #[arg(long)]
    production: bool,

    /// Show diagnostics on error pages.
    #[arg(long, conflicts_with = "production")]
    dev: bool,

    /// Serve missing dataset files as empty instead of failing.
    #[arg(long)]
    empty_datasets: bool,

    /// Enable verbose output (request and dataset logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Resolve flags before moving into CliSettings
        let mode = self.resolve_mode();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            root: self.root,
            mode,
            missing_datasets: self.empty_datasets.then_some(MissingDatasets::Empty),
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.line(Tone::Title, "Folio");
        output.field(
            "Listening",
            format!("{}:{}", config.server.host, config.server.port),
        );
        output.field("Site root", config.site_resolved.root.display());
        if let Some(path) = &config.config_path {
            output.field("Config file", path.display());
        }

        match config.server.mode {
            Mode::Development => {
                output.line(Tone::Caution, "Development mode: error pages show details");
            }
            Mode::Production => output.field("Mode", "production"),
        }

        let missing = match config.site_resolved.missing_datasets {
            MissingDatasets::Fail => "fail",
            MissingDatasets::Empty => "served empty",
        };
        output.field("Missing datasets", missing);

        let server_config = server_config_from_folio_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Resolve run mode from --production/--dev flags.
    fn resolve_mode(&self) -> Option<Mode> {
        if self.production {
            Some(Mode::Production)
        } else {
            self.dev.then_some(Mode::Development)
        }
    }
}
