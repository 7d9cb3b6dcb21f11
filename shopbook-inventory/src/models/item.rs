//! Item model for shopbook-inventory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopbook_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

/// Uploaded product image reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemImage {
    pub url: String,
    pub public_id: String,
    pub original_name: String,
}

/// Inventory item.
///
/// `stock_quantity` is never negative; it is mutated exclusively through the
/// stock ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    pub tenant_id: Uuid,
    pub name: String,
    pub category: String,
    pub stock_quantity: i64,
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub gst_percentage: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ItemImage>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Input for creating or replacing an item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ItemInput {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(range(min = 0, message = "Stock quantity must be 0 or greater"))]
    pub stock_quantity: i64,
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub gst_percentage: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ItemImage>,
}

impl ItemInput {
    /// Field rules the derive cannot express on `Decimal` values.
    pub fn validate_amounts(&self) -> Result<(), AppError> {
        if self.purchase_price <= Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Purchase price must be greater than 0"
            )));
        }
        if self.selling_price <= Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Selling price must be greater than 0"
            )));
        }
        if self.gst_percentage < Decimal::ZERO || self.gst_percentage > Decimal::from(100) {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "GST percentage must be between 0 and 100"
            )));
        }
        Ok(())
    }
}
