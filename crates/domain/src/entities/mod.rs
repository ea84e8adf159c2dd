//! Domain entities - the page, its selections and the forecast lifecycle

mod catalog;
mod forecast;
mod forecast_table;
mod lifecycle;
mod page;
mod selection;

pub use catalog::{ApiParameters, Catalog, ForecastSection, OnlineApi, SectionKeys, Station};
pub use forecast::{ForecastRequest, ForecastResult};
pub use forecast_table::{ColumnMap, ForecastTable};
pub use lifecycle::{ForecastLifecycle, LifecyclePhase};
pub use page::{API_CONTROL, DATA_OUTPUT, Page, STATION_CONTROL, STATION_OUTPUT};
pub use selection::{SelectControl, SelectOption, Selection};
