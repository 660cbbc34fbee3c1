//! # Sale Queries
//!
//! Read-only use cases: fetch one sale, or list sales with filtering and
//! pagination.
//!
//! ## Filter Precedence
//! ```text
//! customer > branch > date range > cancellation flag > all
//! ```
//! Exactly one filter applies per query; a customer filter wins over a
//! branch filter in the same request, and so on down the chain. A date
//! range only applies when both bounds are present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tally_store::SaleRepository;

use crate::error::OpsError;
use crate::projections::{SaleSummary, SaleView};
use crate::validate;

// =============================================================================
// Get
// =============================================================================

/// Loads one sale with all its items.
pub async fn get_sale(repo: &dyn SaleRepository, sale_id: &str) -> Result<SaleView, OpsError> {
    debug!(sale_id = %sale_id, "get_sale");

    let sale = repo
        .get_by_id(sale_id)
        .await?
        .ok_or_else(|| OpsError::not_found("Sale", sale_id))?;

    Ok(SaleView::from(&sale))
}

// =============================================================================
// List
// =============================================================================

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    20
}

/// Listing filter and pagination parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSalesQuery {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// `Some(true)` lists cancelled sales only, `Some(false)` active only.
    #[serde(default)]
    pub cancelled: Option<bool>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ListSalesQuery {
    fn default() -> Self {
        ListSalesQuery {
            customer_id: None,
            branch_id: None,
            start_date: None,
            end_date: None,
            cancelled: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// One page of a sale listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleListResponse {
    pub sales: Vec<SaleSummary>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Lists sales matching the query's highest-precedence filter, newest
/// first, paginated.
pub async fn list_sales(
    repo: &dyn SaleRepository,
    query: ListSalesQuery,
) -> Result<SaleListResponse, OpsError> {
    debug!(page = query.page, page_size = query.page_size, "list_sales");

    validate::validate_list_query(&query)?;

    let sales = if let Some(customer_id) = &query.customer_id {
        repo.get_by_customer(customer_id).await?
    } else if let Some(branch_id) = &query.branch_id {
        repo.get_by_branch(branch_id).await?
    } else if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        repo.get_by_date_range(start, end).await?
    } else if let Some(cancelled) = query.cancelled {
        if cancelled {
            repo.get_cancelled().await?
        } else {
            repo.get_active().await?
        }
    } else {
        repo.get_all().await?
    };

    let total_count = sales.len();
    let total_pages = total_count.div_ceil(query.page_size);

    let sales: Vec<SaleSummary> = sales
        .iter()
        .skip((query.page - 1) * query.page_size)
        .take(query.page_size)
        .map(SaleSummary::from)
        .collect();

    Ok(SaleListResponse {
        sales,
        total_count,
        page: query.page,
        page_size: query.page_size,
        total_pages,
    })
}
