//! Common test utilities for shopbook-inventory integration tests.

use rust_decimal_macros::dec;
use shopbook_core::store::{DocumentStore, MemoryStore};
use shopbook_inventory::models::ItemInput;
use shopbook_inventory::services::ItemService;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,shopbook_inventory=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Build an item service over a fresh in-memory store with a unique tenant.
pub fn spawn_service() -> (ItemService, Uuid) {
    init_tracing();
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    (ItemService::new(store), Uuid::new_v4())
}

/// A valid item input with the given name and opening stock.
pub fn item_input(name: &str, stock_quantity: i64) -> ItemInput {
    ItemInput {
        name: name.to_string(),
        category: "Sports".to_string(),
        stock_quantity,
        purchase_price: dec!(80),
        selling_price: dec!(100),
        gst_percentage: dec!(18),
        description: String::new(),
        images: Vec::new(),
    }
}
