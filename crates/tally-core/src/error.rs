//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                          │
//! │  ├── CoreError        - Domain rule and state violations                │
//! │  └── ValidationError  - Field-level input failures                      │
//! │                                                                         │
//! │  tally-store errors (separate crate)                                    │
//! │  └── StoreError       - Persistence failures                            │
//! │                                                                         │
//! │  tally-ops errors (separate crate)                                      │
//! │  └── OpsError         - What callers see (code + message)               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → OpsError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (sale number, item id, ...)
//! 3. Errors are enum variants, never bare strings
//! 4. Validation failures carry the full list of field errors, not just the
//!    first one encountered

use thiserror::Error;

/// Joins field-level messages for display on the wrapping variant.
fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors: business rule violations and illegal state transitions.
///
/// All variants are deterministic and non-retryable. A failing aggregate
/// method returns before mutating, so the aggregate is left unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced sale does not exist.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Referenced item does not exist within the sale.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// A mutating operation targeted a cancelled sale.
    #[error("Sale {sale_number} is cancelled, cannot perform operation")]
    SaleCancelled { sale_number: String },

    /// `cancel` was called on a sale that is already cancelled.
    #[error("Sale {sale_number} is already cancelled")]
    SaleAlreadyCancelled { sale_number: String },

    /// A mutating operation targeted a cancelled line item.
    #[error("Item {item_id} is cancelled, cannot perform operation")]
    ItemCancelled { item_id: String },

    /// `cancel` was called directly on an item that is already cancelled.
    #[error("Item {item_id} is already cancelled")]
    ItemAlreadyCancelled { item_id: String },

    /// The sale already holds the maximum number of items.
    #[error("Sale cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// One or more fields failed validation.
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
}

impl CoreError {
    /// Wraps a single field failure.
    pub fn validation(error: ValidationError) -> Self {
        CoreError::Validation(vec![error])
    }
}

impl From<ValidationError> for CoreError {
    fn from(error: ValidationError) -> Self {
        CoreError::validation(error)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation errors.
///
/// These occur when input doesn't meet domain requirements. They are
/// collected per operation so the caller sees every failing field at once.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Date lies in the future.
    #[error("{field} cannot be in the future")]
    InFuture { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::SaleCancelled {
            sale_number: "SAL-20260101-0001".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sale SAL-20260101-0001 is cancelled, cannot perform operation"
        );

        let err = CoreError::TooManyItems { max: 100 };
        assert_eq!(err.to_string(), "Sale cannot have more than 100 items");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "saleNumber".to_string(),
        };
        assert_eq!(err.to_string(), "saleNumber is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 20,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 20");
    }

    #[test]
    fn test_validation_list_joined_in_message() {
        let err = CoreError::Validation(vec![
            ValidationError::Required {
                field: "productName".to_string(),
            },
            ValidationError::Negative {
                field: "unitPrice".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: productName is required; unitPrice cannot be negative"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "saleNumber".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(ref errs) if errs.len() == 1));
    }
}
