//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is an i64 number of cents; every rate is an integer     │
//! │    number of basis points. Percentage application uses i128             │
//! │    intermediates with explicit half-up rounding.                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::pricing::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// - **i64 (signed)**: allows negative values for corrections and deltas
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde transparent**: serializes as the raw cent count
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let gross = unit_price.multiply_quantity(3);
    /// assert_eq!(gross.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a basis-point rate and returns the resulting portion,
    /// rounded half-up at cent precision.
    ///
    /// ## Implementation
    /// Integer math on i128 to prevent overflow on large amounts:
    /// `(cents * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{DiscountRate, Money};
    ///
    /// let gross = Money::from_cents(5000); // $50.00
    /// let rate = DiscountRate::from_bps(500); // 5%
    /// assert_eq!(gross.apply_rate(rate).cents(), 250); // $2.50
    /// ```
    pub fn apply_rate(&self, rate: DiscountRate) -> Money {
        let portion = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(portion as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// For debugging and log output; transports format amounts themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
        c -= b;
        assert_eq!(c.cents(), 1000);
    }

    #[test]
    fn test_apply_rate_exact() {
        // $50.00 at 5% = $2.50 exactly
        let gross = Money::from_cents(5000);
        assert_eq!(gross.apply_rate(DiscountRate::from_bps(500)).cents(), 250);

        // $200.00 at 10% = $20.00 exactly
        let gross = Money::from_cents(20000);
        assert_eq!(gross.apply_rate(DiscountRate::from_bps(1000)).cents(), 2000);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 15 cents at 5% = 0.75 cents → 1 cent
        let gross = Money::from_cents(15);
        assert_eq!(gross.apply_rate(DiscountRate::from_bps(500)).cents(), 1);

        // 4 cents at 5% = 0.2 cents → 0 cents
        let gross = Money::from_cents(4);
        assert_eq!(gross.apply_rate(DiscountRate::from_bps(500)).cents(), 0);
    }

    #[test]
    fn test_apply_rate_large_amount_no_overflow() {
        let gross = Money::from_cents(i64::MAX / 2);
        let discounted = gross.apply_rate(DiscountRate::from_bps(2000));
        assert!(discounted.cents() > 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(negative.is_negative());
    }
}
