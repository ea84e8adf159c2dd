//! Forecast URL construction
//!
//! Both functions are pure string templating: no I/O, no hidden state.

use crate::errors::DomainError;
use crate::value_objects::{Coordinates, StationId};

/// Placeholder for the latitude in an online API URL template
pub const LAT_PLACEHOLDER: &str = "LAT";
/// Placeholder for the longitude in an online API URL template
pub const LONG_PLACEHOLDER: &str = "LONG";

/// Build `{origin}/API/{station_id}/forecast?station={station_id}`
///
/// A single trailing `/` on the origin is dropped so that
/// `https://example.com/` and `https://example.com` give the same URL.
///
/// # Examples
///
/// ```
/// use domain::build_forecast_url;
///
/// let url = build_forecast_url("https://example.com", "S42").unwrap();
/// assert_eq!(url, "https://example.com/API/S42/forecast?station=S42");
/// ```
///
/// # Errors
///
/// Returns `InvalidIdentifier` if `station_id` is empty or malformed.
pub fn build_forecast_url(origin: &str, station_id: &str) -> Result<String, DomainError> {
    let station = StationId::new(station_id)?;
    let origin = origin.strip_suffix('/').unwrap_or(origin);
    Ok(format!(
        "{origin}/API/{station}/forecast?station={station}"
    ))
}

/// Substitute a station's coordinates into an online API URL template
///
/// # Examples
///
/// ```
/// use domain::{Coordinates, expand_forecast_template};
///
/// let coords = Coordinates::new(46.72, 1.25).unwrap();
/// let url = expand_forecast_template(
///     "https://api.open-meteo.com/v1/forecast?latitude=LAT&longitude=LONG",
///     &coords,
/// )
/// .unwrap();
/// assert_eq!(url, "https://api.open-meteo.com/v1/forecast?latitude=46.72&longitude=1.25");
/// ```
///
/// # Errors
///
/// Returns `ValidationError` if the template lacks either placeholder.
pub fn expand_forecast_template(
    template: &str,
    coordinates: &Coordinates,
) -> Result<String, DomainError> {
    if !template.contains(LONG_PLACEHOLDER) || !template.contains(LAT_PLACEHOLDER) {
        return Err(DomainError::ValidationError(format!(
            "forecast URL template must contain {LAT_PLACEHOLDER} and {LONG_PLACEHOLDER}: {template}"
        )));
    }
    Ok(template
        .replace(LONG_PLACEHOLDER, &coordinates.longitude().to_string())
        .replace(LAT_PLACEHOLDER, &coordinates.latitude().to_string()))
}
