//! Error types for arprice.

use thiserror::Error;

/// Result type alias for arprice operations.
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Errors that can occur while producing a price estimate.
///
/// Every variant is cheap to clone so that a single failed refresh can be
/// handed to all callers waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// Malformed argument, rejected before any oracle call is made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No usable price model could be produced.
    #[error("Price model unavailable: {0}")]
    ModelUnavailable(String),
}

impl EstimateError {
    /// Builds an [`EstimateError::InvalidInput`] from any displayable message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Builds an [`EstimateError::ModelUnavailable`] from any displayable cause.
    pub fn model_unavailable(cause: impl std::fmt::Display) -> Self {
        Self::ModelUnavailable(cause.to_string())
    }

    /// Returns true if the error was caused by a malformed argument.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns true if the error was caused by a missing price model.
    #[must_use]
    pub const fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EstimateError::invalid_input("byte count must be non-negative");
        assert_eq!(
            err.to_string(),
            "Invalid input: byte count must be non-negative"
        );

        let err = EstimateError::model_unavailable("gateway returned 502");
        assert_eq!(
            err.to_string(),
            "Price model unavailable: gateway returned 502"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(EstimateError::invalid_input("x").is_invalid_input());
        assert!(!EstimateError::invalid_input("x").is_model_unavailable());
        assert!(EstimateError::model_unavailable("x").is_model_unavailable());
    }
}
