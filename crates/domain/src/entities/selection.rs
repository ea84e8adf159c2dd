//! Dropdown controls and the selection they expose

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The option a user has currently chosen in a dropdown control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Value attribute of the option, unique within its control
    pub id: String,
    /// Visible label of the option
    pub label: String,
}

impl Selection {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One `<option>` of a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A named dropdown control with at most one selected option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectControl {
    id: String,
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

impl SelectControl {
    /// Create a control with no option selected
    pub fn new(id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            id: id.into(),
            options,
            selected: None,
        }
    }

    /// Control identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All options in display order
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Select the option whose value equals `value`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no option carries that value; the previous
    /// selection is left untouched.
    pub fn select(&mut self, value: &str) -> Result<(), DomainError> {
        let index = self
            .options
            .iter()
            .position(|o| o.value == value)
            .ok_or_else(|| DomainError::not_found("Option", format!("{}/{value}", self.id)))?;
        self.selected = Some(index);
        Ok(())
    }

    /// Select an option by position
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the index is out of bounds.
    pub fn select_index(&mut self, index: usize) -> Result<(), DomainError> {
        if index >= self.options.len() {
            return Err(DomainError::not_found(
                "Option",
                format!("{}[{index}]", self.id),
            ));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The currently selected option, if any
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// The current selection as a [`Selection`]
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` if no option is selected.
    pub fn selection(&self) -> Result<Selection, DomainError> {
        self.selected_option()
            .map(|o| Selection::new(o.value.clone(), o.label.clone()))
            .ok_or_else(|| DomainError::EmptySelection(self.id.clone()))
    }
}
