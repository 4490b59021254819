//! `folio check` command implementation.
//!
//! Loads every dataset the way the server would and reports the result,
//! so a broken file is caught before deploying.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_data::{DatasetLoader, DatasetName};
use folio_server::server_config_from_folio_config;
use folio_storage::FsStorage;

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root holding the dataset files (overrides config).
    #[arg(short, long, env = "FOLIO_ROOT")]
    root: Option<PathBuf>,

    /// Check only this dataset (projects, portfolio, academics).
    #[arg(short, long)]
    dataset: Option<DatasetName>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any dataset fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let server_config = server_config_from_folio_config(&config);

        let storage = Arc::new(FsStorage::new(server_config.root));
        output.line(Tone::Title, "Checking datasets");
        output.field("Site root", storage.root().display());

        let loader = DatasetLoader::new(storage, server_config.catalog)
            .with_missing_policy(server_config.missing_datasets);

        let names = self.dataset.map_or_else(|| DatasetName::ALL.to_vec(), |name| vec![name]);
        let failures = check_datasets(&loader, &names, &output);
        if failures > 0 {
            return Err(CliError::Check(failures));
        }

        output.line(Tone::Good, "All datasets loaded");
        Ok(())
    }
}

/// Load each dataset, print one line per dataset, and count failures.
fn check_datasets(loader: &DatasetLoader, names: &[DatasetName], output: &Output) -> usize {
    let mut failures = 0;

    for &name in names {
        match loader.load(name) {
            Ok(dataset) if dataset.is_empty() => {
                output.line(Tone::Caution, format!("  {name}: no records"));
            }
            Ok(dataset) => {
                output.line(Tone::Plain, format!("  {name}: {} record(s)", dataset.len()));
                let unaddressable = dataset
                    .entries()
                    .iter()
                    .filter(|entry| entry.id.is_none())
                    .count();
                if unaddressable > 0 {
                    output.line(
                        Tone::Caution,
                        format!("  {name}: {unaddressable} record(s) without a title cannot be linked"),
                    );
                }
            }
            Err(e) => {
                failures += 1;
                output.line(Tone::Bad, format!("  {name}: {e}"));
            }
        }
    }

    failures
}
