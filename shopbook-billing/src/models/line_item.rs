//! Line item model embedded in sales and purchase documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry within a document.
///
/// `item_name`, `unit_price`, and `gst_percentage` are snapshots taken when
/// the document is written; later edits to the Item record do not change
/// historical documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: Option<String>,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub gst_percentage: Decimal,
    pub amount: Decimal,
}

/// Input for one document line.
///
/// A line with an `item_id` is priced from the Item record and moves stock.
/// A line without one is a free-form row: it must carry its own name and
/// unit price and has no stock effect.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemInput {
    pub item_id: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub gst_percentage: Option<Decimal>,
}

/// GST-inclusive line amount: `quantity × unit_price × (1 + gst/100)`.
pub fn compute_amount(quantity: i64, unit_price: Decimal, gst_percentage: Decimal) -> Decimal {
    let base = Decimal::from(quantity) * unit_price;
    base + base * gst_percentage / Decimal::from(100)
}
