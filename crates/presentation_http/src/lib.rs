//! Meteo forecast HTTP presentation layer
//!
//! Serves the station/API catalog and the per-station forecast endpoint
//! that the selection-driven page fetches from.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
