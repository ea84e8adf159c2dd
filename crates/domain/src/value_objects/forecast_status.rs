//! Forecast status value object
//!
//! Represents where a single forecast fetch is in its lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a forecast fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForecastStatus {
    /// The network call has not settled yet
    #[default]
    Pending,
    /// The call settled with a parsed JSON payload
    Ok,
    /// The call settled with an error message
    Error,
}

impl ForecastStatus {
    /// Check if the status is terminal (ok or error)
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Ok | Self::Error)
    }

    /// Get the wire label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ForecastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ForecastStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "ok" => Ok(Self::Ok),
            "error" => Ok(Self::Error),
            _ => Err("Invalid forecast status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(ForecastStatus::default(), ForecastStatus::Pending);
    }

    #[test]
    fn is_settled_works() {
        assert!(!ForecastStatus::Pending.is_settled());
        assert!(ForecastStatus::Ok.is_settled());
        assert!(ForecastStatus::Error.is_settled());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ForecastStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(serde_json::to_string(&ForecastStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn from_str_accepts_labels() {
        assert_eq!("ERROR".parse::<ForecastStatus>(), Ok(ForecastStatus::Error));
        assert!("done".parse::<ForecastStatus>().is_err());
    }
}
