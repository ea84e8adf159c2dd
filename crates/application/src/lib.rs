//! Application layer - Use cases and orchestration
//!
//! Reads selections from a page, drives the forecast lifecycle through the
//! [`ForecastPort`] and renders results back into the page's output
//! elements. Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
