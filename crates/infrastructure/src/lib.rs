//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the ambient
//! concerns: configuration, logging and catalog file loading.

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use catalog::{CatalogError, load_catalog, load_station_metadata};
pub use config::{AppConfig, CatalogConfig, ForecastAppConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
