//! Forecast endpoint handler
//!
//! `GET /API/{station_id}/forecast?station={station_id}&api={api_id}` proxies
//! the upstream forecast for a catalog station.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use domain::{ApiId, StationId};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Query parameters of the forecast endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    /// Must repeat the station id of the path when present
    pub station: Option<String>,
    /// Online API id, defaults to the configured one
    pub api: Option<String>,
}

/// Fetch the upstream forecast for a station
#[instrument(skip(state))]
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Value>, ApiError> {
    let station_id = StationId::new(station_id)?;
    match query.station.as_deref() {
        Some(station) if station != station_id.as_str() => {
            return Err(ApiError::BadRequest(format!(
                "station query {station:?} does not match path station {:?}",
                station_id.as_str()
            )));
        },
        _ => {},
    }

    let api_id = ApiId::new(
        query
            .api
            .unwrap_or_else(|| state.config.forecast.default_api.clone()),
    )?;

    let (url, result) = state
        .forecast_service
        .fetch(station_id.as_str(), api_id.as_str())
        .await?;

    if let Some(message) = result.error_message() {
        return Err(ApiError::BadGateway(format!("{url}: {message}")));
    }

    info!(station = %station_id, api = %api_id, "Served forecast");
    Ok(Json(result.into_payload().unwrap_or(Value::Null)))
}
