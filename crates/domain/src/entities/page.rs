//! In-memory page model: named dropdown controls and named output elements

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::selection::SelectControl;
use crate::errors::DomainError;

/// Identifier of the station dropdown
pub const STATION_CONTROL: &str = "station_selection";
/// Identifier of the forecast API dropdown
pub const API_CONTROL: &str = "API_selection";
/// Output element showing the selected station
pub const STATION_OUTPUT: &str = "station_info";
/// Output element showing the fetched forecast
pub const DATA_OUTPUT: &str = "data_API";

/// A page owning controls and output elements
///
/// The page is the only owner of selection state; readers get a snapshot
/// through [`Page::control`] and writers only replace output text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    controls: BTreeMap<String, SelectControl>,
    outputs: BTreeMap<String, String>,
}

impl Page {
    /// Create an empty page
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a control, keyed by its id
    #[must_use]
    pub fn with_control(mut self, control: SelectControl) -> Self {
        self.controls.insert(control.id().to_string(), control);
        self
    }

    /// Add an empty output element
    #[must_use]
    pub fn with_output(mut self, id: impl Into<String>) -> Self {
        self.outputs.entry(id.into()).or_default();
        self
    }

    /// Look up a control
    pub fn control(&self, id: &str) -> Option<&SelectControl> {
        self.controls.get(id)
    }

    /// Select `value` in the control `control_id`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either the control or the option is missing.
    pub fn select(&mut self, control_id: &str, value: &str) -> Result<(), DomainError> {
        self.controls
            .get_mut(control_id)
            .ok_or_else(|| DomainError::not_found("Control", control_id))?
            .select(value)
    }

    /// Deselect everything in `control_id`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the control is missing.
    pub fn clear_selection(&mut self, control_id: &str) -> Result<(), DomainError> {
        self.controls
            .get_mut(control_id)
            .ok_or_else(|| DomainError::not_found("Control", control_id))?
            .clear_selection();
        Ok(())
    }

    /// Current text of an output element
    pub fn output(&self, id: &str) -> Option<&str> {
        self.outputs.get(id).map(String::as_str)
    }

    /// Ids of all output elements
    pub fn output_ids(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    /// Replace the text of an output element
    ///
    /// # Errors
    ///
    /// Returns `TargetNotFound` if no such element exists.
    pub fn set_output_text(&mut self, id: &str, text: String) -> Result<(), DomainError> {
        let slot = self
            .outputs
            .get_mut(id)
            .ok_or_else(|| DomainError::TargetNotFound(id.to_string()))?;
        *slot = text;
        Ok(())
    }
}
