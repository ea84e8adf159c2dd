//! Catalog loading from the station and online API documents

use std::fs;
use std::path::{Path, PathBuf};

use domain::{Catalog, DomainError};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::CatalogConfig;

/// Errors while loading catalog documents
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A document could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON
    #[error("Invalid JSON in {}: {message}", path.display())]
    Json { path: PathBuf, message: String },

    /// The documents do not describe a valid catalog
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load stations and online APIs from the configured files
#[instrument(skip(config), fields(dir = %config.source_dir.display()))]
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    let stations = read(&config.stations_path())?;
    let apis = read(&config.apis_path())?;
    let catalog = Catalog::from_json(&stations, &apis)?;

    info!(
        stations = catalog.stations().len(),
        apis = catalog.apis().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Load the raw station document as untyped JSON
pub fn load_station_metadata(path: &Path) -> Result<Value, CatalogError> {
    debug!(path = %path.display(), "Loading station metadata");
    let contents = read(path)?;
    serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &str = r#"{"stations": [
        {"id": "BrenneBrain", "name": "Brenne", "coordinates": {"lat": "46.72", "long": "1.25"}}
    ]}"#;

    const APIS: &str = r#"{"API": [
        {"id": "openMeteo", "name": "Open-Meteo",
         "url_forecast": "https://api.open-meteo.com/v1/forecast?latitude=LAT&longitude=LONG"}
    ]}"#;

    fn write_catalog(stations: &str, apis: &str) -> (tempfile::TempDir, CatalogConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stations.json"), stations).unwrap();
        fs::write(dir.path().join("online_api.json"), apis).unwrap();
        let config = CatalogConfig {
            source_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        (dir, config)
    }

    #[test]
    fn loads_catalog() {
        let (_dir, config) = write_catalog(STATIONS, APIS);
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.station("BrenneBrain").unwrap().label(), "Brenne");
        assert_eq!(catalog.api("openMeteo").unwrap().name, "Open-Meteo");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig {
            source_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = load_catalog(&config).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("stations.json"));
    }

    #[test]
    fn invalid_document_is_rejected() {
        let (_dir, config) = write_catalog(STATIONS, r#"{"API": [{"id": "x"}]}"#);
        assert!(matches!(
            load_catalog(&config),
            Err(CatalogError::Invalid(DomainError::ValidationError(_)))
        ));
    }

    #[test]
    fn station_metadata_is_untyped() {
        let (_dir, config) = write_catalog(STATIONS, APIS);
        let value = load_station_metadata(&config.stations_path()).unwrap();
        assert_eq!(value["stations"][0]["coordinates"]["lat"], "46.72");
    }

    #[test]
    fn station_metadata_rejects_bad_json() {
        let (_dir, config) = write_catalog("{not json", APIS);
        assert!(matches!(
            load_station_metadata(&config.stations_path()),
            Err(CatalogError::Json { .. })
        ));
    }
}
