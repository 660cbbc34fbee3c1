//! # tally-store: Persistence Layer for Tally
//!
//! This crate defines the repository contract the use-case layer consumes,
//! plus an in-memory implementation used by tests and lightweight embedders.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  tally-ops use case                                                     │
//! │       │                                                                 │
//! │       │  repo.get_by_id(&sale_id)                                       │
//! │       ▼                                                                 │
//! │  dyn SaleRepository  ← the port, defined here                           │
//! │       │                                                                 │
//! │       ├── InMemorySaleRepository (this crate)                           │
//! │       └── <database-backed implementation, external>                    │
//! │                                                                         │
//! │  The aggregate is loaded, mutated through its own methods, and saved    │
//! │  back whole. Persistence never reaches into aggregate internals.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Last-writer-wins: [`SaleRepository::update`] replaces the stored
//! aggregate wholesale, item set included. Two racing load-modify-save
//! cycles on the same sale resolve to whichever saved last. There is no
//! optimistic version counter.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::InMemorySaleRepository;
pub use repository::SaleRepository;
