//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Route identifier is empty or malformed
    #[error("Invalid route identifier: {0:?}")]
    InvalidRouteId(String),

    /// Coordinate pair failed validation
    #[error("Invalid coordinates for {field}: {value:?}")]
    InvalidCoordinates {
        /// Which request field carried the bad pair
        field: String,
        /// The rejected raw value
        value: String,
    },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid-coordinates error for a named field
    pub fn invalid_coordinates(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            field: field.into(),
            value: value.into(),
        }
    }
}
