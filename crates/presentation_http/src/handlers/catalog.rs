//! Catalog handlers

use axum::{
    Json,
    extract::{Path, State},
};
use domain::Catalog;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// One selectable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// Stations and online APIs available for selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub stations: Vec<CatalogEntry>,
    pub apis: Vec<CatalogEntry>,
    /// API used when a forecast request names none
    pub default_api: String,
}

impl CatalogResponse {
    fn new(catalog: &Catalog, default_api: &str) -> Self {
        Self {
            stations: catalog
                .stations()
                .iter()
                .map(|s| CatalogEntry {
                    id: s.id.to_string(),
                    name: s.label().to_string(),
                })
                .collect(),
            apis: catalog
                .apis()
                .iter()
                .map(|a| CatalogEntry {
                    id: a.id.to_string(),
                    name: a.name.clone(),
                })
                .collect(),
            default_api: default_api.to_string(),
        }
    }
}

/// List every station and online API
pub async fn list_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse::new(
        state.forecast_service.catalog(),
        &state.config.forecast.default_api,
    ))
}

/// One field of an online API entry, e.g. `url_forecast` or `parameters`
#[instrument(skip(state))]
pub async fn get_api_info(
    State(state): State<AppState>,
    Path((api_id, field)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let value = state.forecast_service.catalog().api_info(&api_id, &field)?;
    Ok(Json(value))
}
