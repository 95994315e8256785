//! Configuration management for the Smart Agro Assistant server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRO_ prefix

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Log output configuration
    pub logging: LoggingConfig,

    /// Model artifact locations and degraded-mode switches
    pub models: ModelsConfig,

    /// Optional labelled datasets used for evaluation
    #[serde(default)]
    pub datasets: DatasetsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    /// Rainfall regressor artifact; unset or empty means no rainfall model
    pub rainfall_path: Option<PathBuf>,

    /// Crop classifier artifact
    pub crop_path: PathBuf,

    /// Serve the mean of the lags when no rainfall artifact is configured
    pub allow_lag_average_fallback: bool,

    /// Start without a crop model and answer predictions with 503
    pub allow_degraded_start: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatasetsConfig {
    /// Daily rainfall CSV (semicolon separated)
    pub rainfall_csv: Option<PathBuf>,

    /// Crop recommendation CSV
    pub crop_csv: Option<PathBuf>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("logging.json", false)?
            .set_default("models.rainfall_path", "models/rainfall_model.json")?
            .set_default("models.crop_path", "models/crop_model.json")?
            .set_default("models.allow_lag_average_fallback", false)?
            .set_default("models.allow_degraded_start", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRO_ prefix)
            .add_source(
                Environment::with_prefix("AGRO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ModelsConfig {
    /// The rainfall artifact path, treating an empty value as unset
    pub fn rainfall_artifact(&self) -> Option<&Path> {
        self.rainfall_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            rainfall_path: Some(PathBuf::from("models/rainfall_model.json")),
            crop_path: PathBuf::from("models/crop_model.json"),
            allow_lag_average_fallback: false,
            allow_degraded_start: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            models: ModelsConfig::default(),
            datasets: DatasetsConfig::default(),
        }
    }
}
