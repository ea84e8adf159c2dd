//! Domain layer for meteo-forecast
//!
//! Contains the page model (dropdowns and output elements), forecast
//! requests and results, the station/API catalog and URL construction.
//! No I/O happens here.

pub mod entities;
pub mod errors;
pub mod forecast_url;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use forecast_url::{LAT_PLACEHOLDER, LONG_PLACEHOLDER, build_forecast_url, expand_forecast_template};
pub use value_objects::*;
