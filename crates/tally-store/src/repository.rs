//! # Sale Repository Contract
//!
//! The async port the use-case layer talks to. Implementations store whole
//! [`Sale`] aggregates keyed by id; they never partially update one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tally_core::{Money, Sale};

use crate::error::StoreResult;

/// Persistence port for sale aggregates.
///
/// All collection queries return sales ordered by sale date, newest first.
/// Aggregation queries sum net totals over non-cancelled sales only.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    // =========================================================================
    // CRUD
    // =========================================================================

    /// Persists a new sale.
    ///
    /// Fails with a unique violation when the id or the sale number is
    /// already taken.
    async fn create(&self, sale: Sale) -> StoreResult<Sale>;

    /// Loads a sale by id.
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Sale>>;

    /// Loads a sale by its human-readable sale number.
    async fn get_by_sale_number(&self, sale_number: &str) -> StoreResult<Option<Sale>>;

    /// All sales, date descending.
    async fn get_all(&self) -> StoreResult<Vec<Sale>>;

    /// Replaces the stored aggregate with the given one (last-writer-wins).
    ///
    /// The persisted item set becomes exactly the aggregate's item set:
    /// new items appear, changed items are overwritten, items no longer
    /// present are gone. Item identity is preserved because the item ids
    /// travel with the items.
    ///
    /// Fails with not-found when the sale id is unknown.
    async fn update(&self, sale: Sale) -> StoreResult<Sale>;

    /// Deletes a sale by id. Fails with not-found when absent.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    // =========================================================================
    // Business Queries
    // =========================================================================

    /// Sales for one customer, date descending.
    async fn get_by_customer(&self, customer_id: &str) -> StoreResult<Vec<Sale>>;

    /// Sales for one branch, date descending.
    async fn get_by_branch(&self, branch_id: &str) -> StoreResult<Vec<Sale>>;

    /// Sales whose date falls within `start..=end` (inclusive bounds),
    /// date descending.
    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Sale>>;

    /// Non-cancelled sales, date descending.
    async fn get_active(&self) -> StoreResult<Vec<Sale>>;

    /// Cancelled sales, date descending.
    async fn get_cancelled(&self) -> StoreResult<Vec<Sale>>;

    // =========================================================================
    // Aggregations
    // =========================================================================

    /// Sum of net totals over non-cancelled sales within the date range
    /// (inclusive bounds).
    async fn total_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Money>;

    /// Sum of net totals over a customer's non-cancelled sales.
    async fn total_by_customer(&self, customer_id: &str) -> StoreResult<Money>;

    /// Sum of net totals over a branch's non-cancelled sales.
    async fn total_by_branch(&self, branch_id: &str) -> StoreResult<Money>;

    // =========================================================================
    // Existence Checks
    // =========================================================================

    /// Whether a sale with the given id exists.
    async fn exists(&self, id: &str) -> StoreResult<bool>;

    /// Whether a sale with the given sale number exists.
    async fn exists_by_sale_number(&self, sale_number: &str) -> StoreResult<bool>;
}
