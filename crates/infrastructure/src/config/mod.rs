//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `forecast`: forecast origin, default API and HTTP client settings
//! - `catalog`: station and online API source files
//!
//! Telemetry settings live next to the subscriber setup in
//! [`crate::telemetry`]; the page layout comes from the application layer.

mod catalog;
mod forecast;
mod server;

use std::path::Path;

use application::PageLayout;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use catalog::CatalogConfig;
pub use forecast::ForecastAppConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "METEO_FORECAST";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Forecast fetch configuration
    #[serde(default)]
    pub forecast: ForecastAppConfig,

    /// Catalog source files
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Control and output element names
    #[serde(default)]
    pub page: PageLayout,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// Environment variables override the file, e.g.
    /// `METEO_FORECAST_SERVER__PORT=8080` or `METEO_FORECAST_FORECAST__ORIGIN=...`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// The file must exist; its format is inferred from the extension.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        debug!(path = %path.display(), "Loading configuration file");
        Self::build(config::File::from(path).required(true))
    }

    fn build<T>(file: T) -> Result<Self, config::ConfigError>
    where
        T: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
