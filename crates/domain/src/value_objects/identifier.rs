//! Station and API identifier value objects
//!
//! Identifiers are the `value` attribute of a dropdown option and are
//! interpolated into URL paths and query strings, so they are restricted to
//! ASCII letters, digits, `_`, `-` and `.`.
//!
//! # Examples
//!
//! ```
//! use domain::StationId;
//!
//! let id = StationId::new("S42").unwrap();
//! assert_eq!(id.as_str(), "S42");
//!
//! assert!(StationId::new("").is_err());
//! assert!(StationId::new("a/b").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Maximum identifier length in bytes
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Check whether a string satisfies the identifier syntax
#[must_use]
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_IDENTIFIER_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Validate)]
struct Identifier {
    #[validate(length(min = 1, max = 64))]
    value: String,
}

impl Identifier {
    fn parse(kind: &str, raw: impl Into<String>) -> Result<Self, DomainError> {
        let candidate = Self { value: raw.into() };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidIdentifier(format!("{kind}: {e}")))?;

        if let Some(bad) = candidate
            .value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(DomainError::InvalidIdentifier(format!(
                "{kind} '{}' contains unsupported character {bad:?}",
                candidate.value
            )));
        }

        Ok(candidate)
    }
}

/// Identifier of a weather station
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(Identifier);

impl StationId {
    /// Parse a station identifier
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` if the value is empty, too long, or
    /// contains characters outside `[A-Za-z0-9_.-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        Identifier::parse("station id", value).map(Self)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0.value
    }
}

/// Identifier of an online forecast API
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiId(Identifier);

impl ApiId {
    /// Parse an API identifier
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` under the same rules as [`StationId::new`].
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        Identifier::parse("api id", value).map(Self)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0.value
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for StationId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ApiId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0.value
    }
}

impl From<ApiId> for String {
    fn from(id: ApiId) -> Self {
        id.0.value
    }
}

impl AsRef<str> for StationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ApiId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
