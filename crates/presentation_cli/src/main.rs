//! Meteo forecast CLI
//!
//! Runs the selection-driven forecast fetch from the command line.

#![allow(clippy::print_stdout)]

mod report;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use application::{ForecastService, RefreshOutcome, StationForecastService};
use clap::{Parser, Subcommand};
use domain::{ForecastSection, build_forecast_url};
use infrastructure::{AppConfig, ForecastAdapter, TelemetryConfig, init_telemetry, load_catalog};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Meteo forecast CLI
#[derive(Parser)]
#[command(name = "meteo-forecast")]
#[command(author, version, about = "Selection-driven weather forecast fetcher", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "METEO_FORECAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stations and online APIs of the catalog
    Stations,

    /// Print the forecast URL for a station
    Url {
        /// Station identifier
        #[arg(short, long)]
        station: String,

        /// Origin of the forecast server (default: from configuration)
        #[arg(short, long)]
        origin: Option<String>,
    },

    /// Select a station and an API, fetch, and print the page outputs
    ///
    /// Example: meteo-forecast forecast --station BrenneBrain --api openMeteo
    Forecast {
        /// Station identifier
        #[arg(short, long)]
        station: String,

        /// Online API identifier (default: from configuration)
        #[arg(short, long)]
        api: Option<String>,

        /// Origin of the forecast server (default: from configuration)
        #[arg(short, long)]
        origin: Option<String>,
    },

    /// Fetch straight from the online API and print one section as a table
    Upstream {
        /// Station identifier
        #[arg(short, long)]
        station: String,

        /// Online API identifier (default: from configuration)
        #[arg(short, long)]
        api: Option<String>,

        /// Forecast section: daily or hourly
        #[arg(long, default_value = "daily")]
        section: ForecastSection,
    },

    /// Check that a forecast server is up
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://127.0.0.1:5000")]
        url: String,
    },
}

/// Log filter forced by `-v` flags, `None` keeps the configured one
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Configured telemetry with the filter overridden by `-v` flags
fn telemetry_config(configured: &TelemetryConfig, verbose: u8) -> TelemetryConfig {
    match log_filter_from_verbosity(verbose) {
        Some(filter) => TelemetryConfig {
            log_filter: filter.to_string(),
            ..configured.clone()
        },
        None => configured.clone(),
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Load configuration and the reason defaults were used instead, if any
///
/// An explicit file must load. The default lookup falls back to defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<(AppConfig, Option<String>)> {
    match path {
        Some(path) => Ok((AppConfig::load_from(path)?, None)),
        None => Ok(match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e.to_string())),
        }),
    }
}

fn forecast_adapter(config: &AppConfig) -> anyhow::Result<ForecastAdapter> {
    ForecastAdapter::with_config(config.forecast.client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize forecast client: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, fallback) = load_config(cli.config.as_deref())?;

    init_telemetry(&telemetry_config(&config.telemetry, cli.verbose))?;
    if let Some(error) = fallback {
        warn!(%error, "Failed to load config, using defaults");
    }
    debug!(origin = %config.forecast.origin, "Configuration loaded");

    match cli.command {
        Commands::Stations => {
            let catalog = load_catalog(&config.catalog)?;
            print!(
                "{}",
                report::catalog_listing(&catalog, &config.forecast.default_api)
            );
        },

        Commands::Url { station, origin } => {
            let origin = origin.unwrap_or(config.forecast.origin);
            println!("{}", build_forecast_url(&origin, &station)?);
        },

        Commands::Forecast {
            station,
            api,
            origin,
        } => {
            let catalog = load_catalog(&config.catalog)?;
            let layout = config.page.clone();
            let api = api.unwrap_or_else(|| config.forecast.default_api.clone());

            let mut page = layout.page(&catalog);
            page.select(&layout.station_control, &station)?;
            page.select(&layout.api_control, &api)?;

            let service = ForecastService::new(
                Arc::new(forecast_adapter(&config)?),
                origin.unwrap_or_else(|| config.forecast.origin.clone()),
            )
            .with_layout(layout.clone());

            let page = Mutex::new(page);
            let outcome = service.refresh(&page).await;
            let page = page.into_inner();

            println!(
                "{}",
                report::page_outputs(
                    &page,
                    [layout.station_output.as_str(), layout.data_output.as_str()]
                )
            );

            match outcome? {
                RefreshOutcome::Rendered(result) => {
                    if let Some(message) = result.error_message() {
                        anyhow::bail!("forecast fetch failed: {message}");
                    }
                },
                RefreshOutcome::Superseded => warn!("Refresh was superseded"),
            }
        },

        Commands::Upstream {
            station,
            api,
            section,
        } => {
            let catalog = load_catalog(&config.catalog)?;
            let api = api.unwrap_or_else(|| config.forecast.default_api.clone());
            let adapter = forecast_adapter(&config)?;
            let service = StationForecastService::new(Arc::new(catalog), Arc::new(adapter));

            let table = service.fetch_table(&station, &api, section).await?;
            print!("{table}");
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match client.get(endpoint_url(&url, "/health")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let body = resp.json::<serde_json::Value>().await?;
                    println!("Healthy (version {})", body["version"].as_str().unwrap_or("?"));
                },
                Ok(resp) => {
                    println!("Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
