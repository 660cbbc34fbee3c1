//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of the Tally sale transaction system. It
//! contains the Sale aggregate, the tiered discount pricing engine, and all
//! domain invariants, as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tally Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  Transport (HTTP, CLI, ...)                     │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    tally-ops (use cases)                        │    │
//! │  │    create_sale, add_item, remove_item, cancel_sale, ...         │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ tally-core (THIS CRATE) ★                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   money   │  │  pricing  │  │   sale    │  │ validation│    │    │
//! │  │   │   Money   │  │ Discount  │  │   Sale    │  │   rules   │    │    │
//! │  │   │           │  │   Rate    │  │ SaleItem  │  │  checks   │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                  tally-store (persistence)                      │    │
//! │  │          SaleRepository trait, in-memory implementation         │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Quantity-tiered discount engine
//! - [`item`] - [`SaleItem`] line-item entity
//! - [`sale`] - [`Sale`] aggregate root
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every computation is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: monetary values are cents (i64), rates are basis
//!    points (u32) - no float drift in any total
//! 4. **Single consistency boundary**: all mutations of a sale and its items
//!    go through [`Sale`] methods so the stored totals always agree with the
//!    active item list

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod item;
pub mod money;
pub mod pricing;
pub mod sale;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use item::SaleItem;
pub use money::Money;
pub use pricing::DiscountRate;
pub use sale::Sale;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of line items in a single sale.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Quantities above this are rejected outright rather than capped; the
/// discount table tops out at this bound.
pub const MAX_ITEM_QUANTITY: i64 = 20;

/// Minimum quantity at which any discount applies.
pub const MIN_QUANTITY_FOR_DISCOUNT: i64 = 4;

/// Maximum length of a sale number.
pub const MAX_SALE_NUMBER_LEN: usize = 50;

/// Maximum length of customer, branch, and product names.
pub const MAX_NAME_LEN: usize = 200;
