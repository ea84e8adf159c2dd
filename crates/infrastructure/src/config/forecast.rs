//! Forecast fetch configuration.

use integration_forecast::ForecastClientConfig;
use serde::{Deserialize, Serialize};

/// Forecast fetch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastAppConfig {
    /// Origin the forecast URL is built from (scheme, host and port)
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Online API used when a request does not name one
    #[serde(default = "default_api")]
    pub default_api: String,

    /// Request timeout in seconds, 0 disables it
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for outgoing requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_origin() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_api() -> String {
    "openMeteo".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    ForecastClientConfig::default().user_agent
}

impl Default for ForecastAppConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            default_api: default_api(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ForecastAppConfig {
    /// Client settings derived from this section
    pub fn client_config(&self) -> ForecastClientConfig {
        ForecastClientConfig {
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }
}
