//! Station coordinates value object

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DomainError;

/// Latitude/longitude of a station, in decimal degrees
///
/// Station files store coordinates either as JSON numbers or as numeric
/// strings (`{"lat": "46.72", "long": "1.25"}`); both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    long: f64,
}

impl Coordinates {
    /// Create coordinates with range validation
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(lat: f64, long: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
            return Err(DomainError::ValidationError(format!(
                "coordinates out of range: lat={lat}, long={long}"
            )));
        }
        Ok(Self { lat, long })
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.long
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.long)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value<E: serde::de::Error>(self, field: &str) -> Result<f64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("{field} is not a number: {s:?}"))),
        }
    }
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: Degrees,
    long: Degrees,
}

impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCoordinates::deserialize(deserializer)?;
        let lat = raw.lat.value("lat")?;
        let long = raw.long.value("long")?;
        Self::new(lat, long).map_err(serde::de::Error::custom)
    }
}
