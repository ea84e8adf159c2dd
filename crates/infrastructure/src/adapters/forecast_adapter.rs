//! Forecast adapter - Implements ForecastPort using integration_forecast

use application::error::ApplicationError;
use application::ports::ForecastPort;
use async_trait::async_trait;
use domain::ForecastResult;
use integration_forecast::{
    ForecastClient, ForecastClientConfig, ForecastError, HttpForecastClient,
};
use tracing::{debug, instrument};

/// Adapter settling forecast fetches from an HTTP JSON client
#[derive(Debug, Clone)]
pub struct ForecastAdapter {
    client: HttpForecastClient,
}

impl ForecastAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(ForecastClientConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: ForecastClientConfig) -> Result<Self, ApplicationError> {
        let client = HttpForecastClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Error message shown for a failed fetch
    fn error_message(err: &ForecastError) -> String {
        match err {
            ForecastError::HttpStatus { line, .. } => line.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl ForecastPort for ForecastAdapter {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, url: &str) -> ForecastResult {
        match self.client.fetch_json(url).await {
            Ok(payload) => ForecastResult::ok(payload),
            Err(err) => {
                debug!(error = %err, "Forecast fetch settled with error");
                ForecastResult::error(Self::error_message(&err))
            },
        }
    }
}
