//! Forecast endpoint integration
//!
//! Plain HTTP GET client returning the parsed JSON body of a forecast
//! endpoint. Used both for the local `/API/{station}/forecast` endpoint and
//! for the upstream online APIs (Open-Meteo, MeteoConcept, ...).

pub mod client;

pub use client::{ForecastClient, ForecastClientConfig, ForecastError, HttpForecastClient};
