//! # Validation Module
//!
//! Field-level validators for sale input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Use case (tally-ops)                                          │
//! │  ├── Runs these validators over the whole command input                 │
//! │  └── Collects every failing field into one error list                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity constructors (THIS CRATE)                              │
//! │  ├── Sale::create / SaleItem::create re-run the same checks             │
//! │  └── Guarantee no invalid entity can exist, whatever the caller         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_SALE_NUMBER_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_required_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a sale number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
pub fn validate_sale_number(sale_number: &str) -> ValidationResult<()> {
    validate_required_name("saleNumber", sale_number, MAX_SALE_NUMBER_LEN)
}

/// Validates a customer name (required, at most 200 characters).
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_required_name("customerName", name, MAX_NAME_LEN)
}

/// Validates a branch name (required, at most 200 characters).
pub fn validate_branch_name(name: &str) -> ValidationResult<()> {
    validate_required_name("branchName", name, MAX_NAME_LEN)
}

/// Validates a product name (required, at most 200 characters).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required_name("productName", name, MAX_NAME_LEN)
}

/// Validates an opaque entity reference id (required, non-blank).
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (20)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_unit_price(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "unitPrice".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a sale date does not lie in the future relative to `now`.
///
/// `now` is passed in so the check stays pure and testable.
pub fn validate_sale_date(date: DateTime<Utc>, now: DateTime<Utc>) -> ValidationResult<()> {
    if date > now {
        return Err(ValidationError::InFuture {
            field: "date".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
