//! # Operation Error Type
//!
//! Unified error type for the use-case layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in Tally                                │
//! │                                                                         │
//! │  CoreError (domain)            StoreError (persistence)                 │
//! │       │                              │                                  │
//! │       └──────────────┬───────────────┘                                  │
//! │                      ▼                                                  │
//! │             OpsError { code, message, errors }                          │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  Caller maps the code to its transport:                                 │
//! │    NOT_FOUND        → 404-equivalent                                    │
//! │    VALIDATION_ERROR → 400-equivalent                                    │
//! │    CONFLICT         → 409-equivalent                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is synchronous, non-retryable, and carries a human-readable
//! message. Validation failures additionally carry the full list of
//! field-level messages.

use serde::Serialize;

use tally_core::{CoreError, ValidationError};
use tally_store::StoreError;

/// Error returned from every use case.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "quantity must be between 1 and 20",
///   "errors": ["quantity must be between 1 and 20"]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpsError {
    /// Machine-readable error code for programmatic handling.
    pub code: ErrorCode,

    /// Human-readable error message for display.
    pub message: String,

    /// Field-level messages for validation failures; empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Error codes for operation results: missing aggregate, malformed input,
/// or an illegal state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced sale or item does not exist (404).
    NotFound,

    /// Input validation failed (400).
    ValidationError,

    /// Operation conflicts with current state: cancelled sale, double
    /// cancellation, duplicate sale number (409).
    Conflict,
}

impl OpsError {
    /// Creates a new operation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        OpsError {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        OpsError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a single-message validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        OpsError {
            code: ErrorCode::ValidationError,
            errors: vec![message.clone()],
            message,
        }
    }

    /// Creates a validation error from a list of field failures.
    pub fn validation_errors(errors: Vec<ValidationError>) -> Self {
        let errors: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        OpsError {
            code: ErrorCode::ValidationError,
            message: errors.join("; "),
            errors,
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        OpsError::new(ErrorCode::Conflict, message)
    }
}

/// Converts domain errors to operation errors.
impl From<CoreError> for OpsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SaleNotFound(id) => OpsError::not_found("Sale", &id),
            CoreError::ItemNotFound(id) => OpsError::not_found("Item", &id),
            CoreError::Validation(errors) => OpsError::validation_errors(errors),
            oversized @ CoreError::TooManyItems { .. } => {
                OpsError::validation(oversized.to_string())
            }
            // The remaining variants are all illegal state transitions.
            conflict => OpsError::conflict(conflict.to_string()),
        }
    }
}

/// Converts storage errors to operation errors.
impl From<StoreError> for OpsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => OpsError::not_found(&entity, &id),
            duplicate @ StoreError::UniqueViolation { .. } => {
                OpsError::conflict(duplicate.to_string())
            }
        }
    }
}

impl std::fmt::Display for OpsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for OpsError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: OpsError = CoreError::SaleNotFound("abc".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: OpsError = CoreError::SaleAlreadyCancelled {
            sale_number: "SAL-1".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: OpsError = CoreError::TooManyItems { max: 100 }.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_validation_list_carried_through() {
        let err: OpsError = CoreError::Validation(vec![
            ValidationError::Required {
                field: "productName".to_string(),
            },
            ValidationError::MustBePositive {
                field: "quantity".to_string(),
            },
        ])
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0], "productName is required");
    }

    #[test]
    fn test_store_error_mapping() {
        let err: OpsError = StoreError::not_found("Sale", "abc").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Sale not found: abc");

        let err: OpsError = StoreError::duplicate("saleNumber", "SAL-1").into();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[test]
    fn test_display_includes_code() {
        let err = OpsError::not_found("Sale", "abc");
        assert_eq!(err.to_string(), "[NotFound] Sale not found: abc");
    }
}
