//! # Sale Item Entity
//!
//! A single line item within a sale: a product reference, a quantity, a unit
//! price, and the amounts the pricing engine derives from them.
//!
//! Items are owned by exactly one [`Sale`](crate::Sale); they never exist or
//! get shared outside their aggregate. The `sale_id` field is a plain
//! back-reference, not ownership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{self, DiscountRate};
use crate::validation::{validate_id, validate_product_name, validate_quantity, validate_unit_price};

/// A line item in a sale.
///
/// The four amount fields (`gross`, `discount_rate`, `discount_amount`,
/// `net`) are derived: they are recomputed through the pricing engine every
/// time quantity or unit price changes, never written directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    id: String,
    sale_id: String,
    product_id: String,
    /// Product name at time of sale (denormalized).
    product_name: String,
    quantity: i64,
    unit_price: Money,
    discount_rate: DiscountRate,
    discount_amount: Money,
    gross_amount: Money,
    net_amount: Money,
    cancelled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SaleItem {
    /// Creates a new line item and computes its amounts.
    ///
    /// ## Rules
    /// - `product_id` must be non-blank
    /// - `product_name` must be non-blank and at most 200 characters
    /// - `quantity` must be within `1..=20`
    /// - `unit_price` must be non-negative
    ///
    /// All failing fields are reported together in one
    /// [`CoreError::Validation`].
    pub fn create(
        product_id: &str,
        product_name: &str,
        quantity: i64,
        unit_price: Money,
        sale_id: &str,
    ) -> CoreResult<Self> {
        let mut errors = Vec::new();

        if let Err(e) = validate_id("productId", product_id) {
            errors.push(e);
        }
        if let Err(e) = validate_product_name(product_name) {
            errors.push(e);
        }
        if let Err(e) = validate_quantity(quantity) {
            errors.push(e);
        }
        if let Err(e) = validate_unit_price(unit_price.cents()) {
            errors.push(e);
        }

        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let now = Utc::now();
        let mut item = SaleItem {
            id: Uuid::new_v4().to_string(),
            sale_id: sale_id.to_string(),
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            quantity,
            unit_price,
            discount_rate: DiscountRate::zero(),
            discount_amount: Money::zero(),
            gross_amount: Money::zero(),
            net_amount: Money::zero(),
            cancelled: false,
            created_at: now,
            updated_at: now,
        };

        item.recalculate()?;
        Ok(item)
    }

    /// Recomputes all derived amounts from quantity and unit price.
    ///
    /// `gross = quantity * unit_price`, the pricing engine supplies the
    /// discount rate and amount, `net = gross - discount`.
    fn recalculate(&mut self) -> CoreResult<()> {
        let (rate, discount) = pricing::compute_discount(self.quantity, self.unit_price)?;

        self.gross_amount = self.unit_price.multiply_quantity(self.quantity);
        self.discount_rate = rate;
        self.discount_amount = discount;
        self.net_amount = self.gross_amount - self.discount_amount;
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Updates the item details and recomputes amounts.
    ///
    /// Fails without mutating when the item is cancelled or any field is
    /// invalid.
    pub fn update(&mut self, product_name: &str, quantity: i64, unit_price: Money) -> CoreResult<()> {
        if self.cancelled {
            return Err(CoreError::ItemCancelled {
                item_id: self.id.clone(),
            });
        }

        let mut errors = Vec::new();
        if let Err(e) = validate_product_name(product_name) {
            errors.push(e);
        }
        if let Err(e) = validate_quantity(quantity) {
            errors.push(e);
        }
        if let Err(e) = validate_unit_price(unit_price.cents()) {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        self.product_name = product_name.to_string();
        self.quantity = quantity;
        self.unit_price = unit_price;

        self.recalculate()
    }

    /// Cancels this item.
    ///
    /// The transition is one-way and terminal: cancelling an already
    /// cancelled item is an error, not a silent success. Callers check
    /// [`cancelled`](Self::cancelled) first when they need idempotence.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.cancelled {
            return Err(CoreError::ItemAlreadyCancelled {
                item_id: self.id.clone(),
            });
        }

        self.cancelled = true;
        self.updated_at = Utc::now();
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sale_id(&self) -> &str {
        &self.sale_id
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    pub fn discount_amount(&self) -> Money {
        self.discount_amount
    }

    pub fn gross_amount(&self) -> Money {
        self.gross_amount
    }

    pub fn net_amount(&self) -> Money {
        self.net_amount
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn item(quantity: i64, price_cents: i64) -> SaleItem {
        SaleItem::create(
            "prod-1",
            "Pale Ale 330ml",
            quantity,
            Money::from_cents(price_cents),
            "sale-1",
        )
        .unwrap()
    }

    #[test]
    fn test_create_computes_amounts() {
        let item = item(5, 1000);

        assert_eq!(item.gross_amount().cents(), 5000);
        assert_eq!(item.discount_rate().bps(), 500);
        assert_eq!(item.discount_amount().cents(), 250);
        assert_eq!(item.net_amount().cents(), 4750);
        assert!(!item.cancelled());
        assert_eq!(item.sale_id(), "sale-1");
    }

    #[test]
    fn test_create_collects_all_field_errors() {
        let err = SaleItem::create("", "", 0, Money::from_cents(-1), "sale-1").unwrap_err();

        match err {
            CoreError::Validation(errors) => {
                assert_eq!(errors.len(), 4);
                assert!(matches!(errors[0], ValidationError::Required { .. }));
                assert!(matches!(errors[3], ValidationError::Negative { .. }));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_create_rejects_quantity_over_20() {
        let err =
            SaleItem::create("prod-1", "Pale Ale", 21, Money::from_cents(100), "sale-1").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_update_recomputes_amounts() {
        let mut item = item(2, 1000);
        assert_eq!(item.discount_amount().cents(), 0);

        item.update("Pale Ale 330ml", 10, Money::from_cents(2000)).unwrap();

        assert_eq!(item.quantity(), 10);
        assert_eq!(item.gross_amount().cents(), 20000);
        assert_eq!(item.discount_rate().bps(), 1000);
        assert_eq!(item.discount_amount().cents(), 2000);
        assert_eq!(item.net_amount().cents(), 18000);
    }

    #[test]
    fn test_update_invalid_input_leaves_item_unchanged() {
        let mut item = item(5, 1000);

        let err = item.update("", 0, Money::from_cents(-5)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        assert_eq!(item.product_name(), "Pale Ale 330ml");
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.net_amount().cents(), 4750);
    }

    #[test]
    fn test_update_fails_on_cancelled_item() {
        let mut item = item(5, 1000);
        item.cancel().unwrap();

        let err = item.update("New Name", 5, Money::from_cents(1000)).unwrap_err();
        assert!(matches!(err, CoreError::ItemCancelled { .. }));
    }

    #[test]
    fn test_cancel_twice_fails() {
        let mut item = item(5, 1000);

        item.cancel().unwrap();
        assert!(item.cancelled());

        let err = item.cancel().unwrap_err();
        assert!(matches!(err, CoreError::ItemAlreadyCancelled { .. }));
    }

    #[test]
    fn test_free_item_is_valid() {
        let item = item(4, 0);
        assert_eq!(item.gross_amount().cents(), 0);
        assert_eq!(item.discount_rate().bps(), 500);
        assert_eq!(item.net_amount().cents(), 0);
    }
}
