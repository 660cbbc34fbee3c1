//! # Sale Commands
//!
//! The mutating use cases: create a sale, manage its items, update its
//! header, cancel it. Each one validates the whole input first, then runs a
//! load → aggregate method → save cycle.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tally_core::{Money, Sale, SaleItem, MAX_SALE_ITEMS};
use tally_store::SaleRepository;

use crate::error::OpsError;
use crate::projections::SaleView;
use crate::validate;

// =============================================================================
// Inputs
// =============================================================================

/// One item of a create-sale command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// Create-sale command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleInput {
    pub sale_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub branch_id: String,
    pub branch_name: String,
    /// Explicit sale date; defaults to the creation instant when absent.
    /// Must not lie in the future.
    #[serde(default)]
    pub date: Option<chrono::DateTime<Utc>>,
    pub items: Vec<NewSaleItem>,
}

/// Add-item command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub sale_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// Update-sale command. Absent or blank fields are left unchanged; at least
/// one must be provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleInput {
    pub sale_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemResponse {
    pub sale_id: String,
    pub item_id: String,
    pub gross_total_cents: i64,
    pub discount_total_cents: i64,
    pub net_total_cents: i64,
    pub total_items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemResponse {
    pub sale_id: String,
    pub removed_item_id: String,
    pub gross_total_cents: i64,
    pub discount_total_cents: i64,
    pub net_total_cents: i64,
    pub total_items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleResponse {
    pub id: String,
    pub sale_number: String,
    pub customer_name: String,
    pub branch_name: String,
    pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSaleResponse {
    pub id: String,
    pub sale_number: String,
    pub cancelled: bool,
    pub updated_at: chrono::DateTime<Utc>,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Creates a sale with its initial items and persists it.
///
/// Fails when the sale number is already taken, the item list is empty or
/// over the ceiling, any item fails validation, or the requested date lies
/// in the future.
pub async fn create_sale(
    repo: &dyn SaleRepository,
    input: CreateSaleInput,
) -> Result<SaleView, OpsError> {
    debug!(sale_number = %input.sale_number, items = input.items.len(), "create_sale");

    validate::validate_create_sale(&input, Utc::now())?;

    if repo.exists_by_sale_number(&input.sale_number).await? {
        return Err(OpsError::conflict(format!(
            "Sale with number {} already exists",
            input.sale_number
        )));
    }

    let mut sale = Sale::create(
        &input.sale_number,
        &input.customer_id,
        &input.customer_name,
        &input.branch_id,
        &input.branch_name,
    )?;

    if let Some(date) = input.date {
        sale.set_date(date)?;
    }

    for item in &input.items {
        let item = SaleItem::create(
            &item.product_id,
            &item.product_name,
            item.quantity,
            Money::from_cents(item.unit_price_cents),
            sale.id(),
        )?;
        sale.add_item(item)?;
    }

    let sale = repo.create(sale).await?;

    info!(
        sale_id = %sale.id(),
        sale_number = %sale.sale_number(),
        net_total = %sale.net_total(),
        items = sale.item_count(),
        "Sale created"
    );

    Ok(SaleView::from(&sale))
}

/// Adds one item to an existing sale.
pub async fn add_item(
    repo: &dyn SaleRepository,
    input: AddItemInput,
) -> Result<AddItemResponse, OpsError> {
    debug!(sale_id = %input.sale_id, product_id = %input.product_id, "add_item");

    validate::validate_add_item(&input)?;

    let mut sale = repo
        .get_by_id(&input.sale_id)
        .await?
        .ok_or_else(|| OpsError::not_found("Sale", &input.sale_id))?;

    if sale.cancelled() {
        return Err(OpsError::conflict(format!(
            "Cannot add items to cancelled sale {}",
            sale.sale_number()
        )));
    }

    if sale.item_count() >= MAX_SALE_ITEMS {
        return Err(OpsError::validation(format!(
            "Sale {} already has the maximum number of items ({MAX_SALE_ITEMS})",
            sale.sale_number()
        )));
    }

    let item = SaleItem::create(
        &input.product_id,
        &input.product_name,
        input.quantity,
        Money::from_cents(input.unit_price_cents),
        sale.id(),
    )?;
    let item_id = item.id().to_string();

    sale.add_item(item)?;
    let sale = repo.update(sale).await?;

    info!(sale_id = %sale.id(), item_id = %item_id, net_total = %sale.net_total(), "Item added");

    Ok(AddItemResponse {
        sale_id: sale.id().to_string(),
        item_id,
        gross_total_cents: sale.gross_total().cents(),
        discount_total_cents: sale.discount_total().cents(),
        net_total_cents: sale.net_total().cents(),
        total_items: sale.item_count(),
    })
}

/// Removes one active item from an existing sale.
///
/// Unlike the aggregate's lenient `remove_item`, this operation requires the
/// item to exist and to be active: a missing id is not-found, a cancelled
/// item is a conflict.
pub async fn remove_item(
    repo: &dyn SaleRepository,
    sale_id: &str,
    item_id: &str,
) -> Result<RemoveItemResponse, OpsError> {
    debug!(sale_id = %sale_id, item_id = %item_id, "remove_item");

    let mut sale = repo
        .get_by_id(sale_id)
        .await?
        .ok_or_else(|| OpsError::not_found("Sale", sale_id))?;

    if sale.cancelled() {
        return Err(OpsError::conflict(format!(
            "Cannot remove items from cancelled sale {}",
            sale.sale_number()
        )));
    }

    match sale.find_item(item_id) {
        None => return Err(OpsError::not_found("Item", item_id)),
        Some(item) if item.cancelled() => {
            return Err(OpsError::conflict(format!(
                "Cannot remove cancelled item {item_id} from sale {}",
                sale.sale_number()
            )));
        }
        Some(_) => {}
    }

    sale.remove_item(item_id)?;
    let sale = repo.update(sale).await?;

    info!(sale_id = %sale.id(), item_id = %item_id, net_total = %sale.net_total(), "Item removed");

    Ok(RemoveItemResponse {
        sale_id: sale.id().to_string(),
        removed_item_id: item_id.to_string(),
        gross_total_cents: sale.gross_total().cents(),
        discount_total_cents: sale.discount_total().cents(),
        net_total_cents: sale.net_total().cents(),
        total_items: sale.item_count(),
    })
}

/// Overwrites the customer and/or branch name of an active sale.
pub async fn update_sale(
    repo: &dyn SaleRepository,
    input: UpdateSaleInput,
) -> Result<UpdateSaleResponse, OpsError> {
    debug!(sale_id = %input.sale_id, "update_sale");

    validate::validate_update_sale(&input)?;

    let mut sale = repo
        .get_by_id(&input.sale_id)
        .await?
        .ok_or_else(|| OpsError::not_found("Sale", &input.sale_id))?;

    sale.update(
        input.customer_name.as_deref(),
        input.branch_name.as_deref(),
    )?;

    let sale = repo.update(sale).await?;

    info!(sale_id = %sale.id(), "Sale updated");

    Ok(UpdateSaleResponse {
        id: sale.id().to_string(),
        sale_number: sale.sale_number().to_string(),
        customer_name: sale.customer_name().to_string(),
        branch_name: sale.branch_name().to_string(),
        updated_at: sale.updated_at(),
    })
}

/// Cancels a sale, cascading to every still-active item.
pub async fn cancel_sale(
    repo: &dyn SaleRepository,
    sale_id: &str,
) -> Result<CancelSaleResponse, OpsError> {
    debug!(sale_id = %sale_id, "cancel_sale");

    let mut sale = repo
        .get_by_id(sale_id)
        .await?
        .ok_or_else(|| OpsError::not_found("Sale", sale_id))?;

    sale.cancel()?;
    let sale = repo.update(sale).await?;

    info!(sale_id = %sale.id(), sale_number = %sale.sale_number(), "Sale cancelled");

    Ok(CancelSaleResponse {
        id: sale.id().to_string(),
        sale_number: sale.sale_number().to_string(),
        cancelled: sale.cancelled(),
        updated_at: sale.updated_at(),
    })
}
