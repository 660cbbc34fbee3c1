//! # Pricing Engine
//!
//! Quantity-tiered discount rules for sale line items.
//!
//! ## Tier Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Discount Tiers                                    │
//! │                                                                         │
//! │   quantity ≥ 20  →  20%                                                 │
//! │   quantity ≥ 15  →  15%                                                 │
//! │   quantity ≥ 10  →  10%                                                 │
//! │   quantity ≥  4  →   5%                                                 │
//! │   otherwise      →   0%                                                 │
//! │                                                                         │
//! │   Tiers are inclusive lower bounds, evaluated high-to-low; the          │
//! │   highest matching tier wins. Valid quantities are 1..=20.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure and deterministic: same quantity and unit price,
//! same discount.

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MIN_QUANTITY_FOR_DISCOUNT};

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 500 bps = 5.00%. Basis points keep
/// the rate exact at four decimal places of percent (e.g. 0.0500) with no
/// floating point involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Tier Lookup
// =============================================================================

/// Returns the discount rate for a quantity according to the tier table.
///
/// Assumes the quantity is already validated; out-of-range values fall
/// through to the nearest tier (callers go through [`compute_discount`]).
pub const fn discount_rate_for_quantity(quantity: i64) -> DiscountRate {
    match quantity {
        q if q >= 20 => DiscountRate::from_bps(2000), // 20% for 20 items
        q if q >= 15 => DiscountRate::from_bps(1500), // 15% for 15-19 items
        q if q >= 10 => DiscountRate::from_bps(1000), // 10% for 10-14 items
        q if q >= MIN_QUANTITY_FOR_DISCOUNT => DiscountRate::from_bps(500), // 5% for 4-9 items
        _ => DiscountRate::zero(),                    // no discount for 1-3 items
    }
}

// =============================================================================
// Discount Computation
// =============================================================================

/// Computes the discount rate and amount for one line item.
///
/// `discount = quantity * unit_price * rate`, computed in integer cents
/// with half-up rounding (see [`Money::apply_rate`]).
///
/// ## Errors
/// Fails with a validation error when the quantity is outside `1..=20`.
///
/// ## Example
/// ```rust
/// use tally_core::{pricing, Money};
///
/// let (rate, amount) = pricing::compute_discount(5, Money::from_cents(1000)).unwrap();
/// assert_eq!(rate.bps(), 500); // 5%
/// assert_eq!(amount.cents(), 250); // $2.50 off $50.00
/// ```
pub fn compute_discount(quantity: i64, unit_price: Money) -> CoreResult<(DiscountRate, Money)> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into());
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        }
        .into());
    }

    let gross = unit_price.multiply_quantity(quantity);
    let rate = discount_rate_for_quantity(quantity);

    Ok((rate, gross.apply_rate(rate)))
}

// =============================================================================
// Unit Tests
// =============================================================================
