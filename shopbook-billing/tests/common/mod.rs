//! Common test utilities for shopbook-billing integration tests.

use rust_decimal::Decimal;
use shopbook_billing::models::{DocumentInput, LineItemInput, Party, PartyInput, PartyType};
use shopbook_billing::services::{DocumentEngine, PartyService};
use shopbook_core::store::{DocumentStore, MemoryStore};
use shopbook_inventory::models::{Item, ItemInput};
use shopbook_inventory::services::ItemService;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,shopbook_billing=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// All billing services over one shared in-memory store.
pub struct BillingApp {
    pub store: Arc<dyn DocumentStore>,
    pub items: ItemService,
    pub parties: PartyService,
    pub invoices: DocumentEngine,
    pub purchases: DocumentEngine,
}

/// Build the billing services over a fresh store with a unique tenant.
pub fn spawn_app() -> (BillingApp, Uuid) {
    init_tracing();
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let app = BillingApp {
        items: ItemService::new(store.clone()),
        parties: PartyService::new(store.clone()),
        invoices: DocumentEngine::invoices(store.clone()),
        purchases: DocumentEngine::purchases(store.clone()),
        store,
    };
    (app, Uuid::new_v4())
}

/// Seed an item with the given stock and prices (selling, purchase, GST %).
pub async fn seed_item(
    app: &BillingApp,
    tenant_id: Uuid,
    name: &str,
    stock_quantity: i64,
    selling_price: Decimal,
    purchase_price: Decimal,
    gst_percentage: Decimal,
) -> Item {
    app.items
        .create(
            tenant_id,
            &ItemInput {
                name: name.to_string(),
                category: "Sports".to_string(),
                stock_quantity,
                purchase_price,
                selling_price,
                gst_percentage,
                description: String::new(),
                images: Vec::new(),
            },
        )
        .await
        .expect("Failed to seed item")
}

/// Seed a party of the given type.
pub async fn seed_party(
    app: &BillingApp,
    tenant_id: Uuid,
    name: &str,
    party_type: PartyType,
) -> Party {
    app.parties
        .create(
            tenant_id,
            &PartyInput {
                name: name.to_string(),
                phone: "9876543210".to_string(),
                address: "12 Stadium Road".to_string(),
                party_type,
            },
        )
        .await
        .expect("Failed to seed party")
}

/// A line referencing a seeded item.
pub fn linked_line(item_id: &str, quantity: i64) -> LineItemInput {
    LineItemInput {
        item_id: Some(item_id.to_string()),
        quantity,
        item_name: None,
        unit_price: None,
        gst_percentage: None,
    }
}

/// A document input with no discount, charges, or opening payment.
pub fn document_input(party_id: &str, items: Vec<LineItemInput>) -> DocumentInput {
    DocumentInput {
        party_id: party_id.to_string(),
        items,
        discount_percent: Decimal::ZERO,
        add_charges: Decimal::ZERO,
        round_off: Decimal::ZERO,
        paid_amount: Decimal::ZERO,
        note: String::new(),
    }
}
