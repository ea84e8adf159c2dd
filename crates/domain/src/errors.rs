//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A named control or catalog entry does not exist
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// The control exists but no option is currently selected
    #[error("No option selected in control: {0}")]
    EmptySelection(String),

    /// A station or API identifier is empty or malformed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The output element to render into does not exist
    #[error("Output target not found: {0}")]
    TargetNotFound(String),

    /// A forecast lifecycle transition that is not allowed
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
