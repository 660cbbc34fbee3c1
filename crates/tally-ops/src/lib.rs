//! # tally-ops: Application Use Cases for Tally
//!
//! The application layer: one async function per operation, each following
//! the same load → mutate-through-the-aggregate → save → project cycle.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Use Case Flow                                     │
//! │                                                                         │
//! │  Caller (HTTP handler, CLI, test)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate input ── collects EVERY failing field into one error          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repo.get_by_id() ── load the aggregate                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sale::add_item() / cancel() / ... ── aggregate enforces invariants     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repo.update() ── save the whole aggregate back                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  projection (SaleView, AddItemResponse, ...) ── what the caller sees    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Use cases never reach into aggregate internals and never set totals;
//! the aggregate recomputes them itself on every mutation.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod projections;
pub mod queries;
pub mod sales;

mod validate;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ErrorCode, OpsError};
pub use projections::{SaleItemView, SaleSummary, SaleView};
pub use queries::{get_sale, list_sales, ListSalesQuery, SaleListResponse};
pub use sales::{
    add_item, cancel_sale, create_sale, remove_item, update_sale, AddItemInput, AddItemResponse,
    CancelSaleResponse, CreateSaleInput, NewSaleItem, RemoveItemResponse, UpdateSaleInput,
    UpdateSaleResponse,
};
