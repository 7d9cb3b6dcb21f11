//! Sales and purchase document model.
//!
//! Invoices and purchases carry identical fields and differ only in which
//! collection they live in, which item price is snapshotted, and the sign of
//! the stock movement — captured by [`DocumentKind`].

use crate::models::line_item::{LineItem, LineItemInput};
use crate::models::party::PartyType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopbook_core::error::AppError;
use shopbook_core::store::CollectionPath;
use shopbook_inventory::models::Item;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Invoice,
    Purchase,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Purchase => "purchase",
        }
    }

    pub fn collection(&self, tenant_id: Uuid) -> CollectionPath {
        match self {
            DocumentKind::Invoice => CollectionPath::invoices(tenant_id),
            DocumentKind::Purchase => CollectionPath::purchases(tenant_id),
        }
    }

    /// Sign of the stock delta applied when a document of this kind is
    /// created: sales deduct stock, purchases add to it.
    pub fn stock_sign(&self) -> i64 {
        match self {
            DocumentKind::Invoice => -1,
            DocumentKind::Purchase => 1,
        }
    }

    /// The item price snapshotted into line items of this kind.
    pub fn unit_price(&self, item: &Item) -> Decimal {
        match self {
            DocumentKind::Invoice => item.selling_price,
            DocumentKind::Purchase => item.purchase_price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Paid,
}

impl PaymentStatus {
    /// Status is always derived from amounts, never stored independently.
    pub fn from_amounts(paid_amount: Decimal, total_amount: Decimal) -> Self {
        if paid_amount == Decimal::ZERO {
            PaymentStatus::Unpaid
        } else if paid_amount >= total_amount {
            PaymentStatus::Paid
        } else {
            PaymentStatus::PartiallyPaid
        }
    }
}

/// A sales (invoice) or purchase document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub tenant_id: Uuid,
    pub number: String,
    pub party_id: String,
    pub party_name: String,
    pub party_type: PartyType,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub add_charges: Decimal,
    pub round_off: Decimal,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub note: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Input for creating or replacing a document.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DocumentInput {
    #[validate(length(min = 1, message = "Party is required"))]
    pub party_id: String,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<LineItemInput>,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub add_charges: Decimal,
    #[serde(default)]
    pub round_off: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub note: String,
}

impl DocumentInput {
    /// Per-line and percentage rules the derive cannot express.
    pub fn validate_fields(&self) -> Result<(), AppError> {
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::from(100) {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Discount percentage must be between 0 and 100"
            )));
        }
        for line in &self.items {
            if line.quantity <= 0 {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Line item quantity must be greater than 0"
                )));
            }
            if line.item_id.is_none() {
                let has_name = line
                    .item_name
                    .as_deref()
                    .map(|name| !name.is_empty())
                    .unwrap_or(false);
                if !has_name {
                    return Err(AppError::BadRequest(anyhow::anyhow!(
                        "A line without an item reference needs a name"
                    )));
                }
                match line.unit_price {
                    Some(price) if price > Decimal::ZERO => {}
                    _ => {
                        return Err(AppError::BadRequest(anyhow::anyhow!(
                            "A line without an item reference needs a unit price greater than 0"
                        )))
                    }
                }
                if let Some(gst) = line.gst_percentage {
                    if gst < Decimal::ZERO || gst > Decimal::from(100) {
                        return Err(AppError::BadRequest(anyhow::anyhow!(
                            "GST percentage must be between 0 and 100"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Derived document amounts.
///
/// `discount_amount` is taken on the pre-GST subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub gst_total: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
}

impl Totals {
    pub fn compute(
        items: &[LineItem],
        discount_percent: Decimal,
        add_charges: Decimal,
        round_off: Decimal,
    ) -> Self {
        let hundred = Decimal::from(100);
        let subtotal: Decimal = items
            .iter()
            .map(|line| Decimal::from(line.quantity) * line.unit_price)
            .sum();
        let gst_total: Decimal = items
            .iter()
            .map(|line| Decimal::from(line.quantity) * line.unit_price * line.gst_percentage / hundred)
            .sum();
        let discount_amount = subtotal * discount_percent / hundred;
        let total_amount = subtotal + gst_total - discount_amount + add_charges + round_off;

        Self {
            subtotal,
            gst_total,
            discount_amount,
            total_amount,
        }
    }
}
