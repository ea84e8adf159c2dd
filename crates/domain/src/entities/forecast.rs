//! Forecast request and result records

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::selection::Selection;
use crate::errors::DomainError;
use crate::forecast_url::build_forecast_url;
use crate::value_objects::{ApiId, ForecastStatus, StationId};

/// A forecast request derived from the current station and API selections
///
/// Immutable once constructed; `url` depends only on the origin and the
/// station id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastRequest {
    station_id: StationId,
    api_id: ApiId,
    url: String,
}

impl ForecastRequest {
    /// Build a request for `station_id` / `api_id` against `origin`
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` if either identifier is malformed.
    pub fn new(origin: &str, station_id: &str, api_id: &str) -> Result<Self, DomainError> {
        let url = build_forecast_url(origin, station_id)?;
        Ok(Self {
            station_id: StationId::new(station_id)?,
            api_id: ApiId::new(api_id)?,
            url,
        })
    }

    /// Build a request from the two dropdown selections
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` if either selected value is malformed.
    pub fn from_selections(
        origin: &str,
        station: &Selection,
        api: &Selection,
    ) -> Result<Self, DomainError> {
        Self::new(origin, &station.id, &api.id)
    }

    pub fn station_id(&self) -> &StationId {
        &self.station_id
    }

    pub fn api_id(&self) -> &ApiId {
        &self.api_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Outcome of one forecast fetch
///
/// Starts `pending` and settles exactly once, to either `ok` (with a
/// payload) or `error` (with a message). Settling twice is rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    status: ForecastStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settled_at: Option<DateTime<Utc>>,
}

impl Default for ForecastResult {
    fn default() -> Self {
        Self::pending()
    }
}

impl ForecastResult {
    /// A result whose fetch has not settled yet
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            status: ForecastStatus::Pending,
            payload: None,
            error_message: None,
            settled_at: None,
        }
    }

    /// A result already settled with a payload
    #[must_use]
    pub fn ok(payload: Value) -> Self {
        Self {
            status: ForecastStatus::Ok,
            payload: Some(payload),
            error_message: None,
            settled_at: Some(Utc::now()),
        }
    }

    /// A result already settled with an error
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ForecastStatus::Error,
            payload: None,
            error_message: Some(message.into()),
            settled_at: Some(Utc::now()),
        }
    }

    /// Settle a pending result with a payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the result is already settled.
    pub fn resolve_ok(&mut self, payload: Value) -> Result<(), DomainError> {
        self.ensure_pending(ForecastStatus::Ok)?;
        *self = Self::ok(payload);
        Ok(())
    }

    /// Settle a pending result with an error message
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the result is already settled.
    pub fn resolve_error(&mut self, message: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_pending(ForecastStatus::Error)?;
        *self = Self::error(message);
        Ok(())
    }

    fn ensure_pending(&self, target: ForecastStatus) -> Result<(), DomainError> {
        if self.status.is_settled() {
            return Err(DomainError::InvalidTransition(format!(
                "{} -> {target}",
                self.status
            )));
        }
        Ok(())
    }

    pub const fn status(&self) -> ForecastStatus {
        self.status
    }

    pub const fn is_settled(&self) -> bool {
        self.status.is_settled()
    }

    pub const fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub const fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    /// Consume the result, returning the payload if it settled `ok`
    pub fn into_payload(self) -> Option<Value> {
        self.payload
    }
}
