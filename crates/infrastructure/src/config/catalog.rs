//! Station and online API source files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the catalog documents live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding both documents
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Station document file name
    #[serde(default = "default_stations_file")]
    pub stations_file: String,

    /// Online API document file name
    #[serde(default = "default_apis_file")]
    pub apis_file: String,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_stations_file() -> String {
    "stations.json".to_string()
}

fn default_apis_file() -> String {
    "online_api.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            stations_file: default_stations_file(),
            apis_file: default_apis_file(),
        }
    }
}

impl CatalogConfig {
    pub fn stations_path(&self) -> PathBuf {
        self.source_dir.join(&self.stations_file)
    }

    pub fn apis_path(&self) -> PathBuf {
        self.source_dir.join(&self.apis_file)
    }
}
