//! Forecast lifecycle state machine
//!
//! `Idle -> Pending -> {Ok, Error}`. One lifecycle instance tracks one
//! request; a new request gets a fresh instance.

use serde::Serialize;

use super::forecast::{ForecastRequest, ForecastResult};
use crate::errors::DomainError;
use crate::value_objects::ForecastStatus;

/// Phase of a forecast lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Idle,
    Pending,
    Ok,
    Error,
}

impl LifecyclePhase {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ok | Self::Error)
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Ok => "ok",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Lifecycle of a single forecast request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastLifecycle {
    request: Option<ForecastRequest>,
    result: Option<ForecastResult>,
}

impl ForecastLifecycle {
    /// A lifecycle that has not started
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> LifecyclePhase {
        match (&self.request, &self.result) {
            (None, _) => LifecyclePhase::Idle,
            (Some(_), None) => LifecyclePhase::Pending,
            (Some(_), Some(result)) => match result.status() {
                ForecastStatus::Ok => LifecyclePhase::Ok,
                ForecastStatus::Error => LifecyclePhase::Error,
                ForecastStatus::Pending => LifecyclePhase::Pending,
            },
        }
    }

    /// `Idle -> Pending`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the lifecycle is idle.
    pub fn start(&mut self, request: ForecastRequest) -> Result<(), DomainError> {
        let phase = self.phase();
        if phase != LifecyclePhase::Idle {
            return Err(DomainError::InvalidTransition(format!(
                "{phase} -> pending"
            )));
        }
        self.request = Some(request);
        Ok(())
    }

    /// `Pending -> Ok | Error`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the lifecycle is pending and the
    /// result is settled.
    pub fn settle(&mut self, result: ForecastResult) -> Result<(), DomainError> {
        let phase = self.phase();
        if phase != LifecyclePhase::Pending || !result.is_settled() {
            return Err(DomainError::InvalidTransition(format!(
                "{phase} -> {}",
                result.status()
            )));
        }
        self.result = Some(result);
        Ok(())
    }

    pub const fn request(&self) -> Option<&ForecastRequest> {
        self.request.as_ref()
    }

    pub const fn result(&self) -> Option<&ForecastResult> {
        self.result.as_ref()
    }
}
