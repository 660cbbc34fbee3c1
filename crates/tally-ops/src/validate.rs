//! # Operation-Level Validation
//!
//! Each use case validates its whole input up front, collecting every
//! failing field into one [`OpsError`] before any entity is constructed or
//! any state touched. The individual field rules live in
//! `tally_core::validation`; this module composes them per operation.

use chrono::{DateTime, Utc};

use tally_core::validation::{
    validate_branch_name, validate_customer_name, validate_id, validate_product_name,
    validate_quantity, validate_sale_date, validate_sale_number, validate_unit_price,
};
use tally_core::{ValidationError, MAX_NAME_LEN, MAX_SALE_ITEMS};

use crate::error::OpsError;
use crate::queries::ListSalesQuery;
use crate::sales::{AddItemInput, CreateSaleInput, NewSaleItem, UpdateSaleInput};

/// Largest page size a listing may request.
const MAX_PAGE_SIZE: usize = 100;

fn finish(errors: Vec<ValidationError>) -> Result<(), OpsError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(OpsError::validation_errors(errors))
    }
}

fn collect(errors: &mut Vec<ValidationError>, result: Result<(), ValidationError>) {
    if let Err(e) = result {
        errors.push(e);
    }
}

/// Prefixes an item field error with its list position, e.g.
/// `items[2].quantity must be between 1 and 20`.
fn indexed(idx: usize, error: ValidationError) -> ValidationError {
    let prefix = |field: String| format!("items[{idx}].{field}");
    match error {
        ValidationError::Required { field } => ValidationError::Required {
            field: prefix(field),
        },
        ValidationError::TooLong { field, max } => ValidationError::TooLong {
            field: prefix(field),
            max,
        },
        ValidationError::OutOfRange { field, min, max } => ValidationError::OutOfRange {
            field: prefix(field),
            min,
            max,
        },
        ValidationError::MustBePositive { field } => ValidationError::MustBePositive {
            field: prefix(field),
        },
        ValidationError::Negative { field } => ValidationError::Negative {
            field: prefix(field),
        },
        ValidationError::InFuture { field } => ValidationError::InFuture {
            field: prefix(field),
        },
    }
}

fn item_field_errors(item: &NewSaleItem) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    collect(&mut errors, validate_id("productId", &item.product_id));
    collect(&mut errors, validate_product_name(&item.product_name));
    collect(&mut errors, validate_quantity(item.quantity));
    collect(&mut errors, validate_unit_price(item.unit_price_cents));
    errors
}

/// Validates a whole create-sale command: header fields, optional date, and
/// every item in the list.
pub(crate) fn validate_create_sale(
    input: &CreateSaleInput,
    now: DateTime<Utc>,
) -> Result<(), OpsError> {
    let mut errors = Vec::new();

    collect(&mut errors, validate_sale_number(&input.sale_number));
    collect(&mut errors, validate_id("customerId", &input.customer_id));
    collect(&mut errors, validate_customer_name(&input.customer_name));
    collect(&mut errors, validate_id("branchId", &input.branch_id));
    collect(&mut errors, validate_branch_name(&input.branch_name));

    if let Some(date) = input.date {
        collect(&mut errors, validate_sale_date(date, now));
    }

    if input.items.is_empty() {
        errors.push(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    if input.items.len() > MAX_SALE_ITEMS {
        errors.push(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_SALE_ITEMS as i64,
        });
    }

    for (idx, item) in input.items.iter().enumerate() {
        errors.extend(item_field_errors(item).into_iter().map(|e| indexed(idx, e)));
    }

    finish(errors)
}

/// Validates an add-item command.
pub(crate) fn validate_add_item(input: &AddItemInput) -> Result<(), OpsError> {
    let mut errors = Vec::new();

    collect(&mut errors, validate_id("saleId", &input.sale_id));
    collect(&mut errors, validate_id("productId", &input.product_id));
    collect(&mut errors, validate_product_name(&input.product_name));
    collect(&mut errors, validate_quantity(input.quantity));
    collect(&mut errors, validate_unit_price(input.unit_price_cents));

    finish(errors)
}

/// Validates an update-sale command.
///
/// At least one of the two names must be present and non-blank; provided
/// names must fit the length limit.
pub(crate) fn validate_update_sale(input: &UpdateSaleInput) -> Result<(), OpsError> {
    let provided = |v: &Option<String>| {
        v.as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    };

    if !provided(&input.customer_name) && !provided(&input.branch_name) {
        return Err(OpsError::validation(
            "At least one of customerName or branchName must be provided",
        ));
    }

    let mut errors = Vec::new();

    if let Some(name) = input.customer_name.as_deref() {
        if !name.trim().is_empty() && name.trim().len() > MAX_NAME_LEN {
            errors.push(ValidationError::TooLong {
                field: "customerName".to_string(),
                max: MAX_NAME_LEN,
            });
        }
    }
    if let Some(name) = input.branch_name.as_deref() {
        if !name.trim().is_empty() && name.trim().len() > MAX_NAME_LEN {
            errors.push(ValidationError::TooLong {
                field: "branchName".to_string(),
                max: MAX_NAME_LEN,
            });
        }
    }

    finish(errors)
}

/// Validates listing pagination: page ≥ 1, page size within 1..=100.
pub(crate) fn validate_list_query(query: &ListSalesQuery) -> Result<(), OpsError> {
    let mut errors = Vec::new();

    if query.page == 0 {
        errors.push(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }
    if query.page_size == 0 || query.page_size > MAX_PAGE_SIZE {
        errors.push(ValidationError::OutOfRange {
            field: "pageSize".to_string(),
            min: 1,
            max: MAX_PAGE_SIZE as i64,
        });
    }

    finish(errors)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn valid_item() -> NewSaleItem {
        NewSaleItem {
            product_id: "prod-1".to_string(),
            product_name: "Pale Ale".to_string(),
            quantity: 5,
            unit_price_cents: 1000,
        }
    }

    fn valid_create() -> CreateSaleInput {
        CreateSaleInput {
            sale_number: "SAL-1".to_string(),
            customer_id: "cust-1".to_string(),
            customer_name: "Acme Corp".to_string(),
            branch_id: "br-1".to_string(),
            branch_name: "Main Street".to_string(),
            date: None,
            items: vec![valid_item()],
        }
    }

    #[test]
    fn test_create_sale_valid() {
        assert!(validate_create_sale(&valid_create(), Utc::now()).is_ok());
    }

    #[test]
    fn test_create_sale_collects_item_errors_with_index() {
        let mut input = valid_create();
        input.items.push(NewSaleItem {
            product_id: String::new(),
            product_name: "Ok".to_string(),
            quantity: 25,
            unit_price_cents: -1,
        });

        let err = validate_create_sale(&input, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.errors.len(), 3);
        assert!(err.errors.iter().all(|m| m.starts_with("items[1].")));
    }

    #[test]
    fn test_create_sale_requires_items() {
        let mut input = valid_create();
        input.items.clear();

        let err = validate_create_sale(&input, Utc::now()).unwrap_err();
        assert_eq!(err.errors, vec!["items is required"]);
    }

    #[test]
    fn test_create_sale_rejects_future_date() {
        let mut input = valid_create();
        input.date = Some(Utc::now() + chrono::Duration::hours(1));

        let err = validate_create_sale(&input, Utc::now()).unwrap_err();
        assert_eq!(err.errors, vec!["date cannot be in the future"]);
    }

    #[test]
    fn test_update_sale_requires_some_field() {
        let input = UpdateSaleInput {
            sale_id: "sale-1".to_string(),
            customer_name: None,
            branch_name: Some("  ".to_string()),
        };
        let err = validate_update_sale(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_update_sale_rejects_oversized_name() {
        let input = UpdateSaleInput {
            sale_id: "sale-1".to_string(),
            customer_name: Some("X".repeat(201)),
            branch_name: None,
        };
        let err = validate_update_sale(&input).unwrap_err();
        assert_eq!(err.errors, vec!["customerName must be at most 200 characters"]);
    }

    #[test]
    fn test_list_query_bounds() {
        let mut query = ListSalesQuery::default();
        assert!(validate_list_query(&query).is_ok());

        query.page = 0;
        query.page_size = 101;
        let err = validate_list_query(&query).unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }
}
