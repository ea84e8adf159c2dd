//! Application services - Use case implementations

mod forecast_service;
mod render_sink;
mod selection_reader;
mod station_forecast_service;

pub use forecast_service::{ForecastService, PageLayout, RefreshOutcome};
pub use render_sink::{RenderData, format_result, format_selection, render_station_info};
pub use selection_reader::read_selection;
pub use station_forecast_service::StationForecastService;
