//! # Sale Aggregate
//!
//! The aggregate root of the whole domain: a sale owns its line items
//! exclusively and is the single consistency boundary around them.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale Lifecycle                                     │
//! │                                                                         │
//! │        Active ──────────── cancel() ──────────────► Cancelled           │
//! │          │                                          (terminal)          │
//! │          ├── add_item / remove_item                                     │
//! │          ├── update_item / cancel_item                                  │
//! │          ├── update / set_date                                          │
//! │          │                                                              │
//! │          └── every mutation ends in recalculate_totals()                │
//! │                                                                         │
//! │  Every mutating operation except cancel() fails on a cancelled sale.    │
//! │  cancel() cascades to every still-active item.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals Invariant
//! `net_total == gross_total - discount_total` at all times, and each total
//! equals the sum of the corresponding amount over items where
//! `cancelled == false`. The only writer of the three fields is
//! [`Sale::recalculate_totals`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::item::SaleItem;
use crate::money::Money;
use crate::validation::{
    validate_branch_name, validate_customer_name, validate_id, validate_sale_number,
};
use crate::MAX_SALE_ITEMS;

/// A sale transaction: header fields, an owned ordered list of line items,
/// and totals derived from the active items.
///
/// Items are held by value - no shared ownership, no live back-pointers.
/// External code reaches them read-only through [`items`](Self::items) and
/// mutates them only through aggregate methods, which keep the totals in
/// step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    id: String,
    /// Unique human-readable code, immutable after creation.
    sale_number: String,
    date: DateTime<Utc>,
    customer_id: String,
    customer_name: String,
    branch_id: String,
    branch_name: String,
    items: Vec<SaleItem>,
    gross_total: Money,
    discount_total: Money,
    net_total: Money,
    cancelled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Sale {
    /// Creates a new active sale with zero items and zero totals.
    ///
    /// The sale date defaults to the creation instant; use
    /// [`set_date`](Self::set_date) to override it.
    ///
    /// ## Rules
    /// - `sale_number` non-blank, at most 50 characters
    /// - `customer_id` / `branch_id` non-blank
    /// - `customer_name` / `branch_name` non-blank, at most 200 characters
    pub fn create(
        sale_number: &str,
        customer_id: &str,
        customer_name: &str,
        branch_id: &str,
        branch_name: &str,
    ) -> CoreResult<Self> {
        let mut errors = Vec::new();

        if let Err(e) = validate_sale_number(sale_number) {
            errors.push(e);
        }
        if let Err(e) = validate_id("customerId", customer_id) {
            errors.push(e);
        }
        if let Err(e) = validate_customer_name(customer_name) {
            errors.push(e);
        }
        if let Err(e) = validate_id("branchId", branch_id) {
            errors.push(e);
        }
        if let Err(e) = validate_branch_name(branch_name) {
            errors.push(e);
        }

        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let now = Utc::now();
        Ok(Sale {
            id: Uuid::new_v4().to_string(),
            sale_number: sale_number.to_string(),
            date: now,
            customer_id: customer_id.to_string(),
            customer_name: customer_name.to_string(),
            branch_id: branch_id.to_string(),
            branch_name: branch_name.to_string(),
            items: Vec::new(),
            gross_total: Money::zero(),
            discount_total: Money::zero(),
            net_total: Money::zero(),
            cancelled: false,
            created_at: now,
            updated_at: now,
        })
    }

    // =========================================================================
    // Item Management
    // =========================================================================

    /// Appends a line item and recomputes totals.
    ///
    /// Fails before mutating when the sale is cancelled or already holds the
    /// maximum number of items (cancelled items count against the ceiling).
    pub fn add_item(&mut self, item: SaleItem) -> CoreResult<()> {
        self.ensure_active()?;

        if self.items.len() >= MAX_SALE_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_SALE_ITEMS,
            });
        }

        self.items.push(item);
        self.recalculate_totals();
        self.touch();
        Ok(())
    }

    /// Removes the item with the given id and recomputes totals.
    ///
    /// An unknown id is a no-op, not an error - callers that need
    /// "must exist" semantics check [`find_item`](Self::find_item) first
    /// (the operations layer does).
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<()> {
        self.ensure_active()?;

        let before = self.items.len();
        self.items.retain(|i| i.id() != item_id);

        if self.items.len() != before {
            self.recalculate_totals();
            self.touch();
        }

        Ok(())
    }

    /// Updates a line item in place and recomputes totals.
    pub fn update_item(
        &mut self,
        item_id: &str,
        product_name: &str,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<()> {
        self.ensure_active()?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        item.update(product_name, quantity, unit_price)?;
        self.recalculate_totals();
        self.touch();
        Ok(())
    }

    /// Cancels a single line item without removing it.
    ///
    /// The item stays in the list but stops contributing to totals. The
    /// sale itself remains active.
    pub fn cancel_item(&mut self, item_id: &str) -> CoreResult<()> {
        self.ensure_active()?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        item.cancel()?;
        self.recalculate_totals();
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Recomputes the three totals as sums over the active (non-cancelled)
    /// items.
    ///
    /// Idempotent and free of other side effects; called by every mutation
    /// that changes the item list or an item's amounts.
    pub fn recalculate_totals(&mut self) {
        let mut gross = Money::zero();
        let mut discount = Money::zero();
        let mut net = Money::zero();

        for item in self.items.iter().filter(|i| !i.cancelled()) {
            gross += item.gross_amount();
            discount += item.discount_amount();
            net += item.net_amount();
        }

        self.gross_total = gross;
        self.discount_total = discount;
        self.net_total = net;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Cancels the entire sale and cascades to every still-active item.
    ///
    /// Terminal: a cancelled sale accepts no further mutation. Items that
    /// were already individually cancelled are left untouched by the
    /// cascade.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.cancelled {
            return Err(CoreError::SaleAlreadyCancelled {
                sale_number: self.sale_number.clone(),
            });
        }

        self.cancelled = true;

        for item in self.items.iter_mut().filter(|i| !i.cancelled()) {
            item.cancel()?;
        }

        self.recalculate_totals();
        self.touch();
        Ok(())
    }

    /// Overwrites customer and/or branch name.
    ///
    /// A `None` or blank argument leaves the corresponding field unchanged.
    /// The operations layer rejects calls where both are absent.
    pub fn update(
        &mut self,
        customer_name: Option<&str>,
        branch_name: Option<&str>,
    ) -> CoreResult<()> {
        self.ensure_active()?;

        if let Some(name) = customer_name {
            if !name.trim().is_empty() {
                self.customer_name = name.to_string();
            }
        }

        if let Some(name) = branch_name {
            if !name.trim().is_empty() {
                self.branch_name = name.to_string();
            }
        }

        self.touch();
        Ok(())
    }

    /// Overwrites the sale date.
    pub fn set_date(&mut self, date: DateTime<Utc>) -> CoreResult<()> {
        self.ensure_active()?;

        self.date = date;
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn ensure_active(&self) -> CoreResult<()> {
        if self.cancelled {
            return Err(CoreError::SaleCancelled {
                sale_number: self.sale_number.clone(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sale_number(&self) -> &str {
        &self.sale_number
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    /// All line items, in insertion order, cancelled ones included.
    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    /// Looks up a line item by id.
    pub fn find_item(&self, item_id: &str) -> Option<&SaleItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    /// Number of line items, cancelled ones included.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn gross_total(&self) -> Money {
        self.gross_total
    }

    pub fn discount_total(&self) -> Money {
        self.discount_total
    }

    pub fn net_total(&self) -> Money {
        self.net_total
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

    fn sale() -> Sale {
        Sale::create("SAL-20260101-0001", "cust-1", "Acme Corp", "br-1", "Main Street").unwrap()
    }

    fn item_for(sale: &Sale, quantity: i64, price_cents: i64) -> SaleItem {
        SaleItem::create(
            "prod-1",
            "Pale Ale 330ml",
            quantity,
            Money::from_cents(price_cents),
            sale.id(),
        )
        .unwrap()
    }

    #[test]
    fn test_create_starts_active_with_zero_totals() {
        let sale = sale();

        assert!(!sale.cancelled());
        assert_eq!(sale.item_count(), 0);
        assert!(sale.gross_total().is_zero());
        assert!(sale.discount_total().is_zero());
        assert!(sale.net_total().is_zero());
        assert_eq!(sale.sale_number(), "SAL-20260101-0001");
    }

    #[test]
    fn test_create_collects_all_field_errors() {
        let err = Sale::create("", "", "", "", "").unwrap_err();

        match err {
            CoreError::Validation(errors) => {
                assert_eq!(errors.len(), 5);
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, ValidationError::Required { .. })));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_add_item_recomputes_totals() {
        // qty=5 @ $10.00 → gross $50.00, 5% discount $2.50, net $47.50
        let mut sale = sale();
        let item = item_for(&sale, 5, 1000);

        sale.add_item(item).unwrap();

        assert_eq!(sale.item_count(), 1);
        assert_eq!(sale.gross_total().cents(), 5000);
        assert_eq!(sale.discount_total().cents(), 250);
        assert_eq!(sale.net_total().cents(), 4750);
    }

    #[test]
    fn test_two_items_sum_their_amounts() {
        // A: qty=5 @ $10.00, B: qty=10 @ $20.00
        // gross $250.00, discount $2.50 + $20.00 = $22.50, net $227.50
        let mut sale = sale();
        sale.add_item(item_for(&sale, 5, 1000)).unwrap();
        sale.add_item(item_for(&sale, 10, 2000)).unwrap();

        assert_eq!(sale.gross_total().cents(), 25000);
        assert_eq!(sale.discount_total().cents(), 2250);
        assert_eq!(sale.net_total().cents(), 22750);
    }

    #[test]
    fn test_remove_item_recomputes_totals() {
        let mut sale = sale();
        let item_a = item_for(&sale, 5, 1000);
        let id_a = item_a.id().to_string();
        sale.add_item(item_a).unwrap();
        sale.add_item(item_for(&sale, 10, 2000)).unwrap();

        sale.remove_item(&id_a).unwrap();

        assert_eq!(sale.item_count(), 1);
        assert_eq!(sale.gross_total().cents(), 20000);
        assert_eq!(sale.discount_total().cents(), 2000);
        assert_eq!(sale.net_total().cents(), 18000);
    }

    #[test]
    fn test_remove_unknown_item_is_a_noop() {
        let mut sale = sale();
        sale.add_item(item_for(&sale, 5, 1000)).unwrap();

        sale.remove_item("no-such-item").unwrap();

        assert_eq!(sale.item_count(), 1);
        assert_eq!(sale.net_total().cents(), 4750);
    }

    #[test]
    fn test_update_item_recomputes_totals() {
        let mut sale = sale();
        let item = item_for(&sale, 2, 1000);
        let item_id = item.id().to_string();
        sale.add_item(item).unwrap();
        assert_eq!(sale.discount_total().cents(), 0);

        sale.update_item(&item_id, "Pale Ale 330ml", 10, Money::from_cents(2000))
            .unwrap();

        assert_eq!(sale.gross_total().cents(), 20000);
        assert_eq!(sale.discount_total().cents(), 2000);
        assert_eq!(sale.net_total().cents(), 18000);
    }

    #[test]
    fn test_update_unknown_item_fails() {
        let mut sale = sale();
        let err = sale
            .update_item("no-such-item", "Name", 1, Money::from_cents(100))
            .unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound(_)));
    }

    #[test]
    fn test_cancel_item_excludes_it_from_totals() {
        let mut sale = sale();
        let item_a = item_for(&sale, 5, 1000);
        let id_a = item_a.id().to_string();
        sale.add_item(item_a).unwrap();
        sale.add_item(item_for(&sale, 10, 2000)).unwrap();

        sale.cancel_item(&id_a).unwrap();

        // Item stays in the list but no longer counts.
        assert_eq!(sale.item_count(), 2);
        assert!(sale.find_item(&id_a).unwrap().cancelled());
        assert!(!sale.cancelled());
        assert_eq!(sale.gross_total().cents(), 20000);
        assert_eq!(sale.net_total().cents(), 18000);
    }

    #[test]
    fn test_cancel_item_twice_fails() {
        let mut sale = sale();
        let item = item_for(&sale, 5, 1000);
        let item_id = item.id().to_string();
        sale.add_item(item).unwrap();

        sale.cancel_item(&item_id).unwrap();
        let err = sale.cancel_item(&item_id).unwrap_err();
        assert!(matches!(err, CoreError::ItemAlreadyCancelled { .. }));
    }

    #[test]
    fn test_recalculate_totals_is_idempotent() {
        let mut sale = sale();
        sale.add_item(item_for(&sale, 5, 1000)).unwrap();

        let before = (
            sale.gross_total(),
            sale.discount_total(),
            sale.net_total(),
        );
        sale.recalculate_totals();
        sale.recalculate_totals();
        let after = (
            sale.gross_total(),
            sale.discount_total(),
            sale.net_total(),
        );

        assert_eq!(before, after);
    }

    #[test]
    fn test_cancel_cascades_to_every_item() {
        let mut sale = sale();
        let item_a = item_for(&sale, 5, 1000);
        let id_a = item_a.id().to_string();
        sale.add_item(item_a).unwrap();
        sale.add_item(item_for(&sale, 10, 2000)).unwrap();

        // One item already individually cancelled; the cascade must not
        // trip over it.
        sale.cancel_item(&id_a).unwrap();

        sale.cancel().unwrap();

        assert!(sale.cancelled());
        assert!(sale.items().iter().all(|i| i.cancelled()));
        // No active items remain, so every total collapses to zero.
        assert!(sale.gross_total().is_zero());
        assert!(sale.discount_total().is_zero());
        assert!(sale.net_total().is_zero());
    }

    #[test]
    fn test_cancel_twice_fails() {
        let mut sale = sale();
        sale.cancel().unwrap();

        let err = sale.cancel().unwrap_err();
        assert!(matches!(err, CoreError::SaleAlreadyCancelled { .. }));
    }

    #[test]
    fn test_mutations_fail_on_cancelled_sale() {
        let mut sale = sale();
        let spare = item_for(&sale, 5, 1000);
        sale.cancel().unwrap();

        assert!(matches!(
            sale.add_item(spare).unwrap_err(),
            CoreError::SaleCancelled { .. }
        ));
        assert!(matches!(
            sale.remove_item("any").unwrap_err(),
            CoreError::SaleCancelled { .. }
        ));
        assert!(matches!(
            sale.update(Some("New Name"), None).unwrap_err(),
            CoreError::SaleCancelled { .. }
        ));
        assert!(matches!(
            sale.set_date(Utc::now()).unwrap_err(),
            CoreError::SaleCancelled { .. }
        ));
    }

    #[test]
    fn test_add_item_failure_leaves_sale_unchanged() {
        let mut sale = sale();
        let spare = item_for(&sale, 5, 1000);
        sale.add_item(item_for(&sale, 10, 2000)).unwrap();
        sale.cancel().unwrap();

        let before_count = sale.item_count();
        let before_net = sale.net_total();

        assert!(sale.add_item(spare).is_err());

        assert_eq!(sale.item_count(), before_count);
        assert_eq!(sale.net_total(), before_net);
    }

    #[test]
    fn test_item_ceiling() {
        let mut sale = sale();
        for _ in 0..MAX_SALE_ITEMS {
            sale.add_item(item_for(&sale, 1, 100)).unwrap();
        }
        assert_eq!(sale.item_count(), MAX_SALE_ITEMS);

        let err = sale.add_item(item_for(&sale, 1, 100)).unwrap_err();
        assert!(matches!(err, CoreError::TooManyItems { max: 100 }));
        assert_eq!(sale.item_count(), MAX_SALE_ITEMS);
    }

    #[test]
    fn test_update_overwrites_only_provided_fields() {
        let mut sale = sale();

        sale.update(Some("New Customer"), None).unwrap();
        assert_eq!(sale.customer_name(), "New Customer");
        assert_eq!(sale.branch_name(), "Main Street");

        // Blank strings behave like absent arguments.
        sale.update(Some("  "), Some("New Branch")).unwrap();
        assert_eq!(sale.customer_name(), "New Customer");
        assert_eq!(sale.branch_name(), "New Branch");
    }

    #[test]
    fn test_set_date_overwrites_date() {
        let mut sale = sale();
        let date = Utc::now() - chrono::Duration::days(3);

        sale.set_date(date).unwrap();
        assert_eq!(sale.date(), date);
    }

    #[test]
    fn test_totals_match_active_item_sums_after_every_mutation() {
        let mut sale = sale();
        let item_a = item_for(&sale, 4, 333);
        let id_a = item_a.id().to_string();
        sale.add_item(item_a).unwrap();
        sale.add_item(item_for(&sale, 15, 999)).unwrap();
        sale.cancel_item(&id_a).unwrap();

        let active: Vec<_> = sale.items().iter().filter(|i| !i.cancelled()).collect();
        let gross: i64 = active.iter().map(|i| i.gross_amount().cents()).sum();
        let discount: i64 = active.iter().map(|i| i.discount_amount().cents()).sum();
        let net: i64 = active.iter().map(|i| i.net_amount().cents()).sum();

        assert_eq!(sale.gross_total().cents(), gross);
        assert_eq!(sale.discount_total().cents(), discount);
        assert_eq!(sale.net_total().cents(), net);
        assert_eq!(
            sale.net_total().cents(),
            sale.gross_total().cents() - sale.discount_total().cents()
        );
    }
}
