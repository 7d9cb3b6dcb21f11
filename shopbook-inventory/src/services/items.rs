//! Item CRUD over the document store.

use crate::models::{Item, ItemInput};
use crate::services::metrics::{ITEMS_TOTAL, OP_DURATION};
use crate::services::stock::StockLedger;
use bson::doc;
use shopbook_core::error::AppError;
use shopbook_core::store::{self, CollectionPath, DocumentStore, Sort};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn DocumentStore>,
    stock: StockLedger,
}

impl ItemService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let stock = StockLedger::new(store.clone());
        Self { store, stock }
    }

    /// The ledger sharing this service's store, for callers that adjust
    /// stock directly.
    pub fn stock_ledger(&self) -> &StockLedger {
        &self.stock
    }

    /// Create a new item.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id))]
    pub async fn create(&self, tenant_id: Uuid, input: &ItemInput) -> Result<Item, AppError> {
        input.validate()?;
        input.validate_amounts()?;

        let timer = OP_DURATION.with_label_values(&["create_item"]).start_timer();

        let now = bson::DateTime::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name: input.name.clone(),
            category: input.category.clone(),
            stock_quantity: input.stock_quantity,
            purchase_price: input.purchase_price,
            selling_price: input.selling_price,
            gst_percentage: input.gst_percentage,
            description: input.description.clone(),
            images: input.images.clone(),
            created_at: now,
            updated_at: now,
        };

        let path = CollectionPath::items(tenant_id);
        self.store.put(&path, store::encode(&item)?).await?;

        timer.observe_duration();
        ITEMS_TOTAL.with_label_values(&["created"]).inc();

        info!(item_id = %item.id, name = %item.name, "Item created");

        Ok(item)
    }

    /// Get an item by ID.
    pub async fn get(&self, tenant_id: Uuid, item_id: &str) -> Result<Option<Item>, AppError> {
        let path = CollectionPath::items(tenant_id);
        match self.store.get(&path, item_id).await? {
            Some(document) => Ok(Some(store::decode(document)?)),
            None => Ok(None),
        }
    }

    /// List all items for a tenant, newest first.
    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Item>, AppError> {
        let timer = OP_DURATION.with_label_values(&["list_items"]).start_timer();

        let path = CollectionPath::items(tenant_id);
        let documents = self
            .store
            .list_all(&path, Some(("created_at", Sort::Descending)))
            .await?;

        timer.observe_duration();

        documents.into_iter().map(store::decode).collect()
    }

    /// Replace an item's fields.
    ///
    /// A stock-quantity change is routed through the stock ledger so the
    /// non-negative invariant is enforced on the same path as document
    /// mutations.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, item_id = %item_id))]
    pub async fn update(
        &self,
        tenant_id: Uuid,
        item_id: &str,
        input: &ItemInput,
    ) -> Result<Item, AppError> {
        input.validate()?;
        input.validate_amounts()?;

        let timer = OP_DURATION.with_label_values(&["update_item"]).start_timer();

        let existing = self.get(tenant_id, item_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Item {} does not exist", item_id))
        })?;

        let delta = input.stock_quantity - existing.stock_quantity;
        if delta != 0 {
            self.stock.apply_delta(tenant_id, item_id, delta).await?;
        }

        let updated_at = bson::DateTime::now();
        let path = CollectionPath::items(tenant_id);
        self.store
            .update(
                &path,
                item_id,
                doc! {
                    "name": input.name.clone(),
                    "category": input.category.clone(),
                    "purchase_price": store::encode_value(&input.purchase_price)?,
                    "selling_price": store::encode_value(&input.selling_price)?,
                    "gst_percentage": store::encode_value(&input.gst_percentage)?,
                    "description": input.description.clone(),
                    "images": store::encode_value(&input.images)?,
                    "updated_at": updated_at,
                },
            )
            .await?;

        timer.observe_duration();
        ITEMS_TOTAL.with_label_values(&["updated"]).inc();

        info!("Item updated");

        Ok(Item {
            id: existing.id,
            tenant_id,
            name: input.name.clone(),
            category: input.category.clone(),
            stock_quantity: input.stock_quantity,
            purchase_price: input.purchase_price,
            selling_price: input.selling_price,
            gst_percentage: input.gst_percentage,
            description: input.description.clone(),
            images: input.images.clone(),
            created_at: existing.created_at,
            updated_at,
        })
    }

    /// Delete an item.
    ///
    /// Historical documents referencing the item keep their snapshotted
    /// name and prices; the dangling reference is allowed.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, item_id = %item_id))]
    pub async fn delete(&self, tenant_id: Uuid, item_id: &str) -> Result<(), AppError> {
        let timer = OP_DURATION.with_label_values(&["delete_item"]).start_timer();

        let path = CollectionPath::items(tenant_id);
        self.store.delete(&path, item_id).await?;

        timer.observe_duration();
        ITEMS_TOTAL.with_label_values(&["deleted"]).inc();

        info!("Item deleted");

        Ok(())
    }
}
