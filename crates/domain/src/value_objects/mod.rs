//! Value Objects - Immutable, identity-less domain primitives

mod coordinates;
mod forecast_status;
mod identifier;

pub use coordinates::Coordinates;
pub use forecast_status::ForecastStatus;
pub use identifier::{ApiId, MAX_IDENTIFIER_LEN, StationId, is_valid_identifier};
