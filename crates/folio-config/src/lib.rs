//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `dossier.code`
//!
//! ## Site Root
//!
//! Dataset paths are relative to the site root. The root is resolved once,
//! at load time, against the directory containing `folio.toml` (or the
//! working directory at startup when no config file exists) and stored as
//! an absolute path.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override site root directory.
    pub root: Option<PathBuf>,
    /// Override run mode.
    pub mode: Option<Mode>,
    /// Override missing dataset policy.
    pub missing_datasets: Option<MissingDatasets>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site configuration (root is a relative string from TOML).
    site: SiteConfigRaw,
    /// Dataset file names, relative to the site root.
    pub datasets: DatasetsConfig,
    /// Master dossier gate.
    pub dossier: DossierConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Run mode.
///
/// Development mode exposes diagnostic detail on 500 error pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Show diagnostics on error pages.
    #[default]
    Development,
    /// Hide diagnostics on error pages.
    Production,
}

impl Mode {
    /// Whether diagnostics may be shown.
    #[must_use]
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Run mode.
    pub mode: Mode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            mode: Mode::default(),
        }
    }
}

/// What to do when a dataset file is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDatasets {
    /// Respond with a server error.
    #[default]
    Fail,
    /// Serve an empty dataset.
    Empty,
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    root: Option<String>,
    missing_datasets: Option<MissingDatasets>,
}

/// Resolved site configuration with an absolute root.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Site root directory.
    pub root: PathBuf,
    /// Missing dataset policy.
    pub missing_datasets: MissingDatasets,
}

/// Dataset file names, relative to the site root.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatasetsConfig {
    /// Projects document.
    pub projects: String,
    /// Portfolio document.
    pub portfolio: String,
    /// Academics document.
    pub academics: String,
    /// Directory of per-course documents.
    pub courses_dir: String,
    /// Directory of quiz documents.
    pub quizzes_dir: String,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            projects: "projects.json".to_owned(),
            portfolio: "portfolio_data.json".to_owned(),
            academics: "academics.json".to_owned(),
            courses_dir: "courses".to_owned(),
            quizzes_dir: "static/courses".to_owned(),
        }
    }
}

/// Status returned when the dossier code is wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenyWith {
    /// Pretend the page does not exist.
    #[default]
    NotFound,
    /// Respond with 403.
    Forbidden,
}

/// Master dossier gate configuration.
///
/// The code is a shared literal compared in plain text. It hides a page,
/// it does not protect it.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DossierConfig {
    /// Expected `code` query value.
    pub code: String,
    /// Status for a wrong or missing code.
    pub deny_with: DenyWith,
}

impl Default for DossierConfig {
    fn default() -> Self {
        Self {
            code: "utsa2026".to_owned(),
            deny_with: DenyWith::default(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`dossier.code`").
        field: String,
        /// Error message (e.g., "${`DOSSIER_CODE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Make a path absolute without touching the filesystem.
fn absolutize(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root) = &settings.root {
            self.site_resolved.root = absolutize(root.clone());
        }
        if let Some(mode) = settings.mode {
            self.server.mode = mode;
        }
        if let Some(missing) = settings.missing_datasets {
            self.site_resolved.missing_datasets = missing;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config rooted at the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config rooted at the given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfigRaw::default(),
            datasets: DatasetsConfig::default(),
            dossier: DossierConfig::default(),
            site_resolved: SiteConfig {
                root: absolutize(base.to_path_buf()),
                missing_datasets: MissingDatasets::default(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_datasets()?;
        require_non_empty(&self.dossier.code, "dossier.code")?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate dataset file names.
    fn validate_datasets(&self) -> Result<(), ConfigError> {
        let datasets = &self.datasets;
        require_non_empty(&datasets.projects, "datasets.projects")?;
        require_non_empty(&datasets.portfolio, "datasets.portfolio")?;
        require_non_empty(&datasets.academics, "datasets.academics")?;
        require_non_empty(&datasets.courses_dir, "datasets.courses_dir")?;
        require_non_empty(&datasets.quizzes_dir, "datasets.quizzes_dir")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.dossier.code = expand::expand_env(&self.dossier.code, "dossier.code")?;
        Ok(())
    }

    /// Resolve the site root against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let root = match self.site.root.as_deref() {
            Some(root) => config_dir.join(root),
            None => config_dir.to_path_buf(),
        };

        self.site_resolved = SiteConfig {
            root: absolutize(root),
            missing_datasets: self.site.missing_datasets.unwrap_or_default(),
        };
    }
}
