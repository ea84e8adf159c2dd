//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::{ForecastPort, StationForecastService};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use domain::{Catalog, ForecastResult};
use infrastructure::AppConfig;
use parking_lot::Mutex;
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

const STATIONS: &str = r#"{"stations": [
    {"id": "BrenneBrain", "name": "Brenne", "coordinates": {"lat": "46.72", "long": "1.25"}},
    {"id": "S2", "coordinates": {"lat": 48.1, "long": -1.6}}
]}"#;

const APIS: &str = r#"{"API": [
    {"id": "openMeteo", "name": "Open-Meteo",
     "url_forecast": "https://api.open-meteo.com/v1/forecast?latitude=LAT&longitude=LONG",
     "parameters": {"daily": {"date": "time"}}},
    {"id": "meteoConcept", "name": "Meteo Concept",
     "url_forecast": "https://api.meteo-concept.com/api/forecast/daily?latlng=LAT,LONG"}
]}"#;

/// Stub upstream that records requested URLs
struct StubForecast {
    result: ForecastResult,
    urls: Mutex<Vec<String>>,
}

impl StubForecast {
    fn ok(payload: Value) -> Self {
        Self {
            result: ForecastResult::ok(payload),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: ForecastResult::error(message),
            urls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ForecastPort for StubForecast {
    async fn fetch_forecast(&self, url: &str) -> ForecastResult {
        self.urls.lock().push(url.to_string());
        self.result.clone()
    }
}

fn create_test_server(port: Arc<StubForecast>) -> TestServer {
    let catalog = Catalog::from_json(STATIONS, APIS).expect("valid catalog");
    let state = AppState {
        forecast_service: Arc::new(StationForecastService::new(Arc::new(catalog), port)),
        config: Arc::new(AppConfig::default()),
    };
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let server = create_test_server(Arc::new(StubForecast::ok(json!({}))));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn catalog_lists_stations_and_apis() {
    let server = create_test_server(Arc::new(StubForecast::ok(json!({}))));

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["stations"][0], json!({"id": "BrenneBrain", "name": "Brenne"}));
    assert_eq!(body["stations"][1], json!({"id": "S2", "name": "S2"}));
    assert_eq!(body["apis"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["default_api"], "openMeteo");
}

#[tokio::test]
async fn api_info_returns_field() {
    let server = create_test_server(Arc::new(StubForecast::ok(json!({}))));

    let response = server.get("/apis/meteoConcept/name").await;

    response.assert_status_ok();
    response.assert_json(&json!("Meteo Concept"));
}

#[tokio::test]
async fn api_info_unknown_field_is_not_found() {
    let server = create_test_server(Arc::new(StubForecast::ok(json!({}))));

    server
        .get("/apis/openMeteo/nope")
        .await
        .assert_status_not_found();
    server
        .get("/apis/unknown/name")
        .await
        .assert_status_not_found();
}

// ============================================================================
// Forecast endpoint
// ============================================================================

#[tokio::test]
async fn forecast_uses_default_api() {
    let port = Arc::new(StubForecast::ok(json!({"daily": {"time": ["2022-03-01"]}})));
    let server = create_test_server(Arc::clone(&port));

    let response = server
        .get("/API/BrenneBrain/forecast")
        .add_query_param("station", "BrenneBrain")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"daily": {"time": ["2022-03-01"]}}));
    assert_eq!(
        *port.urls.lock(),
        ["https://api.open-meteo.com/v1/forecast?latitude=46.72&longitude=1.25"]
    );
}

#[tokio::test]
async fn forecast_with_explicit_api() {
    let port = Arc::new(StubForecast::ok(json!({"forecast": []})));
    let server = create_test_server(Arc::clone(&port));

    let response = server
        .get("/API/S2/forecast")
        .add_query_param("station", "S2")
        .add_query_param("api", "meteoConcept")
        .await;

    response.assert_status_ok();
    assert_eq!(
        *port.urls.lock(),
        ["https://api.meteo-concept.com/api/forecast/daily?latlng=48.1,-1.6"]
    );
}

#[tokio::test]
async fn forecast_station_mismatch_is_bad_request() {
    let port = Arc::new(StubForecast::ok(json!({})));
    let server = create_test_server(Arc::clone(&port));

    let response = server
        .get("/API/BrenneBrain/forecast")
        .add_query_param("station", "S2")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
    assert!(port.urls.lock().is_empty());
}

#[tokio::test]
async fn forecast_invalid_station_id_is_bad_request() {
    let server = create_test_server(Arc::new(StubForecast::ok(json!({}))));

    server
        .get("/API/bad%20id/forecast")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn forecast_unknown_station_is_not_found() {
    let server = create_test_server(Arc::new(StubForecast::ok(json!({}))));

    let response = server.get("/API/Nowhere/forecast").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "Station not found: Nowhere");
}

#[tokio::test]
async fn forecast_unknown_api_is_not_found() {
    let server = create_test_server(Arc::new(StubForecast::ok(json!({}))));

    server
        .get("/API/S2/forecast")
        .add_query_param("api", "darkSky")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn forecast_upstream_error_is_bad_gateway() {
    let server = create_test_server(Arc::new(StubForecast::failing("500 Internal Server Error")));

    let response = server.get("/API/BrenneBrain/forecast").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_gateway");
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .ends_with(": 500 Internal Server Error")
    );
}
