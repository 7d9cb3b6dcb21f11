//! Cross-crate workflow integration tests library.
//!
//! Wires every shopbook engine over one shared in-memory document store so
//! complete business flows (stock in, sale out, money collected, reversals)
//! can be exercised end to end without a running database.

use shopbook_billing::services::{DocumentEngine, PartyService};
use shopbook_core::store::{DocumentStore, MemoryStore};
use shopbook_inventory::services::ItemService;
use shopbook_payments::services::PaymentLedger;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Every shopbook engine over one shared store.
///
/// Each test should create its own app and tenant for isolation.
pub struct ShopbookApp {
    pub store: Arc<dyn DocumentStore>,
    pub items: ItemService,
    pub parties: PartyService,
    pub invoices: DocumentEngine,
    pub purchases: DocumentEngine,
    pub payments: PaymentLedger,
}

impl ShopbookApp {
    pub fn new() -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        Self {
            items: ItemService::new(store.clone()),
            parties: PartyService::new(store.clone()),
            invoices: DocumentEngine::invoices(store.clone()),
            purchases: DocumentEngine::purchases(store.clone()),
            payments: PaymentLedger::new(store.clone()),
            store,
        }
    }
}

impl Default for ShopbookApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh app and a unique tenant for test isolation.
pub fn spawn_app() -> (ShopbookApp, Uuid) {
    init_tracing();
    (ShopbookApp::new(), Uuid::new_v4())
}
