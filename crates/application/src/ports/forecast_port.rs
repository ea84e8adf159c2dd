//! Forecast fetch port
//!
//! Defines the interface for retrieving forecast JSON over the network.

use async_trait::async_trait;
use domain::ForecastResult;
#[cfg(test)]
use mockall::automock;

/// Port for forecast retrieval
///
/// Implementations issue exactly one request per call and never fail:
/// transport errors, bad statuses and unparseable bodies all settle the
/// returned result as `error`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch `url` and settle a [`ForecastResult`]
    async fn fetch_forecast(&self, url: &str) -> ForecastResult;
}
