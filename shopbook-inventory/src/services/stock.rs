//! Stock ledger: the single mutation path for item stock quantities.

use crate::models::Item;
use crate::services::metrics::{OP_DURATION, STOCK_MOVEMENTS_TOTAL};
use bson::doc;
use shopbook_core::error::AppError;
use shopbook_core::store::{self, CollectionPath, DocumentStore};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Applies signed deltas to item stock while holding the non-negative
/// invariant. Every caller path (sales, purchases, direct item edits) goes
/// through [`StockLedger::apply_delta`].
#[derive(Clone)]
pub struct StockLedger {
    store: Arc<dyn DocumentStore>,
}

impl StockLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Apply a signed delta to an item's stock quantity and return the new
    /// quantity.
    ///
    /// Fails with `NotFound` when the item does not resolve and with
    /// `InsufficientStock` when the delta would drive the quantity negative;
    /// in both cases the item record is left unmodified.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, item_id = %item_id))]
    pub async fn apply_delta(
        &self,
        tenant_id: Uuid,
        item_id: &str,
        delta: i64,
    ) -> Result<i64, AppError> {
        let timer = OP_DURATION
            .with_label_values(&["apply_stock_delta"])
            .start_timer();

        let path = CollectionPath::items(tenant_id);
        let document = self.store.get(&path, item_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Item {} does not exist", item_id))
        })?;
        let item: Item = store::decode(document)?;

        let new_quantity = item.stock_quantity + delta;
        if new_quantity < 0 {
            return Err(AppError::InsufficientStock {
                item_id: item_id.to_string(),
                available: item.stock_quantity,
                requested: delta.abs(),
            });
        }

        self.store
            .update(
                &path,
                item_id,
                doc! {
                    "stock_quantity": new_quantity,
                    "updated_at": bson::DateTime::now(),
                },
            )
            .await?;

        timer.observe_duration();

        let direction = if delta < 0 { "out" } else { "in" };
        STOCK_MOVEMENTS_TOTAL.with_label_values(&[direction]).inc();

        info!(delta, new_quantity, "Stock level adjusted");

        Ok(new_quantity)
    }
}
