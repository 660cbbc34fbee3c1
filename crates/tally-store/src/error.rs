//! # Storage Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StoreError (this module)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OpsError (tally-ops) ← mapped to NOT_FOUND / CONFLICT codes            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller maps codes to its transport (404 / 409 / ...)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (duplicate sale id or sale number).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Sale", "abc-123");
        assert_eq!(err.to_string(), "Sale not found: abc-123");

        let err = StoreError::duplicate("saleNumber", "SAL-20260101-0001");
        assert_eq!(
            err.to_string(),
            "Duplicate saleNumber: 'SAL-20260101-0001' already exists"
        );
    }
}
