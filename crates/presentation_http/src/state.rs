//! Application state shared across handlers

use std::sync::Arc;

use application::StationForecastService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upstream forecast service over the loaded catalog
    pub forecast_service: Arc<StationForecastService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
