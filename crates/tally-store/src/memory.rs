//! # In-Memory Sale Repository
//!
//! HashMap-backed implementation of [`SaleRepository`]. This is the store
//! the test suites run against, and it doubles as a usable backend for
//! embedders that don't need durability.
//!
//! Aggregates are cloned on the way in and out, so no caller ever holds an
//! alias into the store - the only path back in is [`SaleRepository::update`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use tally_core::{Money, Sale};

use crate::error::{StoreError, StoreResult};
use crate::repository::SaleRepository;

/// In-memory sale store keyed by sale id.
#[derive(Debug, Default)]
pub struct InMemorySaleRepository {
    sales: RwLock<HashMap<String, Sale>>,
}

impl InMemorySaleRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects sales matching a predicate, ordered date descending.
    async fn collect<F>(&self, predicate: F) -> Vec<Sale>
    where
        F: Fn(&Sale) -> bool,
    {
        let sales = self.sales.read().await;
        let mut matched: Vec<Sale> = sales.values().filter(|&s| predicate(s)).cloned().collect();
        matched.sort_by(|a, b| b.date().cmp(&a.date()));
        matched
    }

    /// Sums net totals over non-cancelled sales matching a predicate.
    async fn sum_net<F>(&self, predicate: F) -> Money
    where
        F: Fn(&Sale) -> bool,
    {
        let sales = self.sales.read().await;
        sales
            .values()
            .filter(|&s| !s.cancelled() && predicate(s))
            .fold(Money::zero(), |acc, s| acc + s.net_total())
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn create(&self, sale: Sale) -> StoreResult<Sale> {
        let mut sales = self.sales.write().await;

        if sales.contains_key(sale.id()) {
            return Err(StoreError::duplicate("id", sale.id()));
        }
        if sales.values().any(|s| s.sale_number() == sale.sale_number()) {
            return Err(StoreError::duplicate("saleNumber", sale.sale_number()));
        }

        debug!(sale_id = %sale.id(), sale_number = %sale.sale_number(), "Storing sale");
        sales.insert(sale.id().to_string(), sale.clone());
        Ok(sale)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Sale>> {
        let sales = self.sales.read().await;
        Ok(sales.get(id).cloned())
    }

    async fn get_by_sale_number(&self, sale_number: &str) -> StoreResult<Option<Sale>> {
        let sales = self.sales.read().await;
        Ok(sales
            .values()
            .find(|s| s.sale_number() == sale_number)
            .cloned())
    }

    async fn get_all(&self) -> StoreResult<Vec<Sale>> {
        Ok(self.collect(|_| true).await)
    }

    async fn update(&self, sale: Sale) -> StoreResult<Sale> {
        let mut sales = self.sales.write().await;

        if !sales.contains_key(sale.id()) {
            return Err(StoreError::not_found("Sale", sale.id()));
        }

        debug!(sale_id = %sale.id(), "Replacing stored sale");
        sales.insert(sale.id().to_string(), sale.clone());
        Ok(sale)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut sales = self.sales.write().await;

        if sales.remove(id).is_none() {
            return Err(StoreError::not_found("Sale", id));
        }

        debug!(sale_id = %id, "Deleted sale");
        Ok(())
    }

    async fn get_by_customer(&self, customer_id: &str) -> StoreResult<Vec<Sale>> {
        Ok(self.collect(|s| s.customer_id() == customer_id).await)
    }

    async fn get_by_branch(&self, branch_id: &str) -> StoreResult<Vec<Sale>> {
        Ok(self.collect(|s| s.branch_id() == branch_id).await)
    }

    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Sale>> {
        Ok(self
            .collect(|s| s.date() >= start && s.date() <= end)
            .await)
    }

    async fn get_active(&self) -> StoreResult<Vec<Sale>> {
        Ok(self.collect(|s| !s.cancelled()).await)
    }

    async fn get_cancelled(&self) -> StoreResult<Vec<Sale>> {
        Ok(self.collect(|s| s.cancelled()).await)
    }

    async fn total_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Money> {
        Ok(self.sum_net(|s| s.date() >= start && s.date() <= end).await)
    }

    async fn total_by_customer(&self, customer_id: &str) -> StoreResult<Money> {
        Ok(self.sum_net(|s| s.customer_id() == customer_id).await)
    }

    async fn total_by_branch(&self, branch_id: &str) -> StoreResult<Money> {
        Ok(self.sum_net(|s| s.branch_id() == branch_id).await)
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        let sales = self.sales.read().await;
        Ok(sales.contains_key(id))
    }

    async fn exists_by_sale_number(&self, sale_number: &str) -> StoreResult<bool> {
        let sales = self.sales.read().await;
        Ok(sales.values().any(|s| s.sale_number() == sale_number))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
