//! # Result Projections
//!
//! Read-only, flattened representations of aggregate state returned to
//! callers. Amounts are exposed as integer cents and rates as basis points;
//! transports format them for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tally_core::{Sale, SaleItem};

/// Full view of one line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemView {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Discount rate in basis points (500 = 5%).
    pub discount_rate_bps: u32,
    pub discount_amount_cents: i64,
    pub gross_amount_cents: i64,
    pub net_amount_cents: i64,
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SaleItem> for SaleItemView {
    fn from(item: &SaleItem) -> Self {
        SaleItemView {
            id: item.id().to_string(),
            product_id: item.product_id().to_string(),
            product_name: item.product_name().to_string(),
            quantity: item.quantity(),
            unit_price_cents: item.unit_price().cents(),
            discount_rate_bps: item.discount_rate().bps(),
            discount_amount_cents: item.discount_amount().cents(),
            gross_amount_cents: item.gross_amount().cents(),
            net_amount_cents: item.net_amount().cents(),
            cancelled: item.cancelled(),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

/// Full view of one sale, items included.
///
/// Returned by `create_sale` and `get_sale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: String,
    pub sale_number: String,
    pub date: DateTime<Utc>,
    pub customer_id: String,
    pub customer_name: String,
    pub branch_id: String,
    pub branch_name: String,
    pub gross_total_cents: i64,
    pub discount_total_cents: i64,
    pub net_total_cents: i64,
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<SaleItemView>,
}

impl From<&Sale> for SaleView {
    fn from(sale: &Sale) -> Self {
        SaleView {
            id: sale.id().to_string(),
            sale_number: sale.sale_number().to_string(),
            date: sale.date(),
            customer_id: sale.customer_id().to_string(),
            customer_name: sale.customer_name().to_string(),
            branch_id: sale.branch_id().to_string(),
            branch_name: sale.branch_name().to_string(),
            gross_total_cents: sale.gross_total().cents(),
            discount_total_cents: sale.discount_total().cents(),
            net_total_cents: sale.net_total().cents(),
            cancelled: sale.cancelled(),
            created_at: sale.created_at(),
            updated_at: sale.updated_at(),
            items: sale.items().iter().map(SaleItemView::from).collect(),
        }
    }
}

/// One row of a sale listing - header fields only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub id: String,
    pub sale_number: String,
    pub date: DateTime<Utc>,
    pub customer_id: String,
    pub customer_name: String,
    pub branch_id: String,
    pub branch_name: String,
    pub net_total_cents: i64,
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
    /// Number of line items, cancelled ones included.
    pub item_count: usize,
}

impl From<&Sale> for SaleSummary {
    fn from(sale: &Sale) -> Self {
        SaleSummary {
            id: sale.id().to_string(),
            sale_number: sale.sale_number().to_string(),
            date: sale.date(),
            customer_id: sale.customer_id().to_string(),
            customer_name: sale.customer_name().to_string(),
            branch_id: sale.branch_id().to_string(),
            branch_name: sale.branch_name().to_string(),
            net_total_cents: sale.net_total().cents(),
            cancelled: sale.cancelled(),
            created_at: sale.created_at(),
            item_count: sale.item_count(),
        }
    }
}
