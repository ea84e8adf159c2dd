//! Meteo forecast HTTP server
//!
//! Serves the catalog and the per-station forecast endpoint.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use application::StationForecastService;
use infrastructure::{AppConfig, ForecastAdapter, init_telemetry, load_catalog};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_telemetry(&config.telemetry)?;
    if let Err(e) = &loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!("Meteo forecast server v{} starting", env!("CARGO_PKG_VERSION"));

    let catalog = load_catalog(&config.catalog)?;
    info!(
        stations = catalog.stations().len(),
        apis = catalog.apis().len(),
        source = %config.catalog.source_dir.display(),
        "Catalog loaded"
    );

    let adapter = ForecastAdapter::with_config(config.forecast.client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize forecast client: {e}"))?;

    let forecast_service = StationForecastService::new(Arc::new(catalog), Arc::new(adapter));

    let config = Arc::new(config);
    let state = AppState {
        forecast_service: Arc::new(forecast_service),
        config: Arc::clone(&config),
    };

    let mut app = routes::create_router(state).layer(TraceLayer::new_for_http());
    if config.server.cors_enabled {
        // The page may be served from another origin
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (signalled_tx, signalled_rx) = oneshot::channel();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Waiting up to {:?} for connections to close", shutdown_timeout);
            let _ = signalled_tx.send(());
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        () = drain_deadline(signalled_rx, shutdown_timeout) => {
            warn!("Connections still open after {:?}, forcing shutdown", shutdown_timeout);
        },
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Resolve `timeout` after the shutdown signal fires
///
/// Never resolves if the signal future is dropped without firing.
async fn drain_deadline(signalled: oneshot::Receiver<()>, timeout: Duration) {
    if signalled.await.is_ok() {
        tokio::time::sleep(timeout).await;
    } else {
        std::future::pending::<()>().await;
    }
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
