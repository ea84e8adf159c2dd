//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Catalog
        .route("/", get(handlers::catalog::list_catalog))
        .route("/apis/{api_id}/{field}", get(handlers::catalog::get_api_info))
        // Forecast endpoint the page fetches from
        .route(
            "/API/{station_id}/forecast",
            get(handlers::forecast::get_forecast),
        )
        // Health
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}
