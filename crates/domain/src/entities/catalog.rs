//! Station and online API catalogs
//!
//! Both lists come from static JSON documents:
//!
//! ```json
//! {"stations": [{"id": "BrenneBrain", "name": "Brenne", "coordinates": {"lat": "46.72", "long": "1.25"}}]}
//! {"API": [{"id": "openMeteo", "name": "Open-Meteo", "url_forecast": "https://...latitude=LAT&longitude=LONG",
//!           "parameters": {"daily": {"temp_max": "temperature_2m_max"}}}]}
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::forecast_table::{ColumnMap, ForecastTable};
use super::page::{API_CONTROL, DATA_OUTPUT, Page, STATION_CONTROL, STATION_OUTPUT};
use super::selection::{SelectControl, SelectOption};
use crate::errors::DomainError;
use crate::forecast_url::expand_forecast_template;
use crate::value_objects::{ApiId, Coordinates, StationId};

/// A weather station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub coordinates: Coordinates,
}

impl Station {
    /// Display label: the name if present, otherwise the id
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// Granularity of an upstream forecast section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSection {
    #[default]
    Daily,
    Hourly,
}

impl fmt::Display for ForecastSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::Hourly => f.write_str("hourly"),
        }
    }
}

impl std::str::FromStr for ForecastSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "hourly" => Ok(Self::Hourly),
            _ => Err(format!("Invalid section: {s}. Use 'daily' or 'hourly'")),
        }
    }
}

/// Column mappings per section
///
/// A `null` section (the API has no such forecast) reads as an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiParameters {
    #[serde(default, deserialize_with = "nullable_map")]
    pub daily: ColumnMap,
    #[serde(default, deserialize_with = "nullable_map")]
    pub hourly: ColumnMap,
}

fn nullable_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ColumnMap, D::Error> {
    Ok(Option::<ColumnMap>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload keys holding each section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionKeys {
    #[serde(default = "default_daily_key")]
    pub daily: String,
    #[serde(default = "default_hourly_key")]
    pub hourly: String,
}

fn default_daily_key() -> String {
    "daily".to_string()
}

fn default_hourly_key() -> String {
    "hourly".to_string()
}

impl Default for SectionKeys {
    fn default() -> Self {
        Self {
            daily: default_daily_key(),
            hourly: default_hourly_key(),
        }
    }
}

/// An online forecast API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineApi {
    pub id: ApiId,
    pub name: String,
    /// URL template with `LAT` and `LONG` placeholders
    pub url_forecast: String,
    #[serde(default)]
    pub parameters: ApiParameters,
    #[serde(default)]
    pub sections: SectionKeys,
    /// Canonical columns whose negative values are invalid readings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_negative: Vec<String>,
}

impl OnlineApi {
    /// Upstream forecast URL for a station
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the template lacks a placeholder.
    pub fn forecast_url(&self, station: &Station) -> Result<String, DomainError> {
        expand_forecast_template(&self.url_forecast, &station.coordinates)
    }

    /// Payload key of a section
    pub fn section_key(&self, section: ForecastSection) -> &str {
        match section {
            ForecastSection::Daily => &self.sections.daily,
            ForecastSection::Hourly => &self.sections.hourly,
        }
    }

    /// Column mapping of a section
    pub fn column_map(&self, section: ForecastSection) -> &ColumnMap {
        match section {
            ForecastSection::Daily => &self.parameters.daily,
            ForecastSection::Hourly => &self.parameters.hourly,
        }
    }

    /// Extract a section of `payload` and clear invalid negative readings
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the payload lacks the section.
    pub fn table(
        &self,
        payload: &Value,
        section: ForecastSection,
    ) -> Result<ForecastTable, DomainError> {
        let mut table = ForecastTable::from_section(
            payload,
            self.section_key(section),
            self.column_map(section),
        )?;
        for column in &self.non_negative {
            table.mask_negative(column);
        }
        Ok(table)
    }
}

#[derive(Deserialize)]
struct StationsDocument {
    stations: Vec<Station>,
}

#[derive(Deserialize)]
struct ApisDocument {
    #[serde(rename = "API")]
    apis: Vec<OnlineApi>,
}

/// The static station and online API lists
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    stations: Vec<Station>,
    apis: Vec<OnlineApi>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if two stations or two APIs share an id.
    pub fn new(stations: Vec<Station>, apis: Vec<OnlineApi>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        if let Some(dup) = stations.iter().find(|s| !seen.insert(s.id.as_str())) {
            return Err(DomainError::ValidationError(format!(
                "duplicate station id: {}",
                dup.id
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = apis.iter().find(|a| !seen.insert(a.id.as_str())) {
            return Err(DomainError::ValidationError(format!(
                "duplicate API id: {}",
                dup.id
            )));
        }
        Ok(Self { stations, apis })
    }

    /// Parse the `stations.json` and `online_api.json` documents
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` on malformed JSON or duplicate ids.
    pub fn from_json(stations_json: &str, apis_json: &str) -> Result<Self, DomainError> {
        let stations: StationsDocument = serde_json::from_str(stations_json)
            .map_err(|e| DomainError::ValidationError(format!("stations document: {e}")))?;
        let apis: ApisDocument = serde_json::from_str(apis_json)
            .map_err(|e| DomainError::ValidationError(format!("API document: {e}")))?;
        Self::new(stations.stations, apis.apis)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn apis(&self) -> &[OnlineApi] {
        &self.apis
    }

    /// Look up a station by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no station has that id.
    pub fn station(&self, id: &str) -> Result<&Station, DomainError> {
        self.stations
            .iter()
            .find(|s| s.id.as_str() == id)
            .ok_or_else(|| DomainError::not_found("Station", id))
    }

    /// Look up an online API by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no API has that id.
    pub fn api(&self, id: &str) -> Result<&OnlineApi, DomainError> {
        self.apis
            .iter()
            .find(|a| a.id.as_str() == id)
            .ok_or_else(|| DomainError::not_found("API", id))
    }

    /// One field of an API entry, as JSON
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the API or the field does not exist.
    pub fn api_info(&self, id: &str, field: &str) -> Result<Value, DomainError> {
        let api = self.api(id)?;
        let mut value = serde_json::to_value(api)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        value
            .get_mut(field)
            .map(Value::take)
            .ok_or_else(|| DomainError::not_found("API field", format!("{id}.{field}")))
    }

    /// Upstream forecast URL for a station/API pair
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids, `ValidationError` for a bad template.
    pub fn upstream_url(&self, station_id: &str, api_id: &str) -> Result<String, DomainError> {
        let station = self.station(station_id)?;
        self.api(api_id)?.forecast_url(station)
    }

    /// A page listing every station and API, with empty output elements
    pub fn page(&self) -> Page {
        self.page_with(STATION_CONTROL, API_CONTROL, [STATION_OUTPUT, DATA_OUTPUT])
    }

    /// Same as [`Catalog::page`] under custom control and output ids
    pub fn page_with<'a>(
        &self,
        station_control: &str,
        api_control: &str,
        outputs: impl IntoIterator<Item = &'a str>,
    ) -> Page {
        let stations = self
            .stations
            .iter()
            .map(|s| SelectOption::new(s.id.as_str(), s.label()))
            .collect();
        let apis = self
            .apis
            .iter()
            .map(|a| SelectOption::new(a.id.as_str(), a.name.clone()))
            .collect();

        outputs.into_iter().fold(
            Page::new()
                .with_control(SelectControl::new(station_control, stations))
                .with_control(SelectControl::new(api_control, apis)),
            Page::with_output,
        )
    }
}
