//! Forecast HTTP client
//!
//! One GET per call, no retries. The body is read as text and parsed as
//! JSON so that a malformed body is reported as a parse error rather than a
//! transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

/// Forecast client errors
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-2xx status
    #[error("{line}")]
    HttpStatus {
        /// Numeric status code
        status: u16,
        /// `"<code> <reason>"`, e.g. `"500 Internal Server Error"`
        line: String,
    },

    /// The body is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No response within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl ForecastError {
    fn from_status(status: StatusCode) -> Self {
        Self::HttpStatus {
            status: status.as_u16(),
            line: status_line(status),
        }
    }

    fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// `"<code> <reason>"`, or just the code when the reason is unknown
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// Forecast client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastClientConfig {
    /// Request timeout in seconds, 0 disables it (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("meteo-forecast/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ForecastClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Client trait for fetching forecast JSON
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// GET `url` and parse the body as JSON
    async fn fetch_json(&self, url: &str) -> Result<Value, ForecastError>;
}

/// reqwest-backed forecast client
#[derive(Debug, Clone)]
pub struct HttpForecastClient {
    client: Client,
    config: ForecastClientConfig,
}

impl HttpForecastClient {
    /// Create a client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ForecastClientConfig) -> Result<Self, ForecastError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ForecastError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ForecastError> {
        Self::new(ForecastClientConfig::default())
    }

    pub const fn config(&self) -> &ForecastClientConfig {
        &self.config
    }
}

#[async_trait]
impl ForecastClient for HttpForecastClient {
    #[instrument(skip(self))]
    async fn fetch_json(&self, url: &str) -> Result<Value, ForecastError> {
        debug!(url = %url, "Fetching forecast");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ForecastError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "Forecast endpoint returned an error status");
            return Err(ForecastError::from_status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForecastError::from_transport(&e))?;

        serde_json::from_str(&body).map_err(|e| ForecastError::ParseError(e.to_string()))
    }
}
