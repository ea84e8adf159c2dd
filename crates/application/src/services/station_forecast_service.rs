//! Station forecast service
//!
//! Server side of the forecast endpoint: resolves a station and an online
//! API from the catalog, expands the API's URL template with the station's
//! coordinates and fetches the upstream forecast.

use std::{fmt, sync::Arc};

use domain::{Catalog, ForecastResult, ForecastSection, ForecastTable};
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::ForecastPort};

/// Fetches upstream forecasts for catalog stations
pub struct StationForecastService {
    catalog: Arc<Catalog>,
    port: Arc<dyn ForecastPort>,
}

impl fmt::Debug for StationForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationForecastService")
            .field("stations", &self.catalog.stations().len())
            .field("apis", &self.catalog.apis().len())
            .finish_non_exhaustive()
    }
}

impl StationForecastService {
    pub fn new(catalog: Arc<Catalog>, port: Arc<dyn ForecastPort>) -> Self {
        Self { catalog, port }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch the upstream forecast for `station_id` from `api_id`
    ///
    /// Returns the upstream URL alongside the settled result. Upstream
    /// failures are carried inside the result.
    ///
    /// # Errors
    ///
    /// Returns a domain error for unknown ids or a bad URL template.
    #[instrument(skip(self))]
    pub async fn fetch(
        &self,
        station_id: &str,
        api_id: &str,
    ) -> Result<(String, ForecastResult), ApplicationError> {
        let url = self.catalog.upstream_url(station_id, api_id)?;
        debug!(url = %url, "Fetching upstream forecast");

        let result = self.port.fetch_forecast(&url).await;
        if let Some(message) = result.error_message() {
            warn!(url = %url, error = %message, "Upstream forecast failed");
        }
        Ok((url, result))
    }

    /// Fetch and extract one section as a table with canonical column names
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if the upstream fetch failed and a domain
    /// error for unknown ids or a payload without the section.
    #[instrument(skip(self))]
    pub async fn fetch_table(
        &self,
        station_id: &str,
        api_id: &str,
        section: ForecastSection,
    ) -> Result<ForecastTable, ApplicationError> {
        let api = self.catalog.api(api_id)?;
        let (url, result) = self.fetch(station_id, api_id).await?;

        let Some(payload) = result.payload() else {
            return Err(ApplicationError::ExternalService(format!(
                "{url}: {}",
                result.error_message().unwrap_or("no payload")
            )));
        };

        let table = api.table(payload, section)?;
        debug!(rows = table.len(), columns = table.columns().len(), "Extracted forecast table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockForecastPort;
    use domain::DomainError;
    use serde_json::json;

    const STATIONS: &str = r#"{"stations": [
        {"id": "BrenneBrain", "name": "Brenne", "coordinates": {"lat": "46.72", "long": "1.25"}}
    ]}"#;

    const APIS: &str = r#"{"API": [
        {"id": "openMeteo", "name": "Open-Meteo",
         "url_forecast": "https://api.open-meteo.com/v1/forecast?latitude=LAT&longitude=LONG",
         "parameters": {"daily": {"date": "time", "temp_max": "temperature_2m_max"}}}
    ]}"#;

    fn service(mock: MockForecastPort) -> StationForecastService {
        let catalog = Catalog::from_json(STATIONS, APIS).unwrap();
        StationForecastService::new(Arc::new(catalog), Arc::new(mock))
    }

    #[tokio::test]
    async fn test_fetch_expands_template() {
        let mut mock = MockForecastPort::new();
        mock.expect_fetch_forecast()
            .withf(|url| url == "https://api.open-meteo.com/v1/forecast?latitude=46.72&longitude=1.25")
            .times(1)
            .returning(|_| ForecastResult::ok(json!({"daily": {}})));

        let (url, result) = service(mock).fetch("BrenneBrain", "openMeteo").await.unwrap();
        assert!(url.contains("latitude=46.72"));
        assert!(result.payload().is_some());
    }

    #[tokio::test]
    async fn test_fetch_unknown_station() {
        let mut mock = MockForecastPort::new();
        mock.expect_fetch_forecast().times(0);

        let err = service(mock).fetch("Nowhere", "openMeteo").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_table_renames_columns() {
        let mut mock = MockForecastPort::new();
        mock.expect_fetch_forecast().returning(|_| {
            ForecastResult::ok(json!({
                "daily": {
                    "time": ["2022-03-01", "2022-03-02"],
                    "temperature_2m_max": [12.5, 14.0]
                }
            }))
        });

        let table = service(mock)
            .fetch_table("BrenneBrain", "openMeteo", ForecastSection::Daily)
            .await
            .unwrap();
        assert_eq!(table.columns(), ["date", "temp_max"]);
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_table_upstream_error() {
        let mut mock = MockForecastPort::new();
        mock.expect_fetch_forecast()
            .returning(|_| ForecastResult::error("503 Service Unavailable"));

        let err = service(mock)
            .fetch_table("BrenneBrain", "openMeteo", ForecastSection::Daily)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(ref m) if m.ends_with("503 Service Unavailable")));
    }

    #[tokio::test]
    async fn test_fetch_table_missing_section() {
        let mut mock = MockForecastPort::new();
        mock.expect_fetch_forecast()
            .returning(|_| ForecastResult::ok(json!({"daily": {}})));

        let err = service(mock)
            .fetch_table("BrenneBrain", "openMeteo", ForecastSection::Hourly)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::ValidationError(_))
        ));
    }
}
