//! Common test utilities for shopbook-payments integration tests.

use rust_decimal::Decimal;
use shopbook_billing::models::{
    DocumentInput, DocumentKind, LineItemInput, PartyInput, PartyType, TradeDocument,
};
use shopbook_billing::services::{DocumentEngine, PartyService};
use shopbook_core::store::{DocumentStore, MemoryStore};
use shopbook_inventory::models::ItemInput;
use shopbook_inventory::services::ItemService;
use shopbook_payments::models::{PaymentInput, PaymentMode};
use shopbook_payments::services::PaymentLedger;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,shopbook_payments=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Payment ledger plus the engines needed to seed its targets, over one
/// shared in-memory store.
pub struct PaymentApp {
    pub store: Arc<dyn DocumentStore>,
    pub items: ItemService,
    pub parties: PartyService,
    pub invoices: DocumentEngine,
    pub purchases: DocumentEngine,
    pub payments: PaymentLedger,
}

/// Build the services over a fresh store with a unique tenant.
pub fn spawn_app() -> (PaymentApp, Uuid) {
    init_tracing();
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let app = PaymentApp {
        items: ItemService::new(store.clone()),
        parties: PartyService::new(store.clone()),
        invoices: DocumentEngine::invoices(store.clone()),
        purchases: DocumentEngine::purchases(store.clone()),
        payments: PaymentLedger::new(store.clone()),
        store,
    };
    (app, Uuid::new_v4())
}

/// Seed a document of the given kind whose total is `unit_price` (one item,
/// quantity 1, no GST) with nothing paid yet.
pub async fn seed_document(
    app: &PaymentApp,
    tenant_id: Uuid,
    kind: DocumentKind,
    unit_price: Decimal,
) -> TradeDocument {
    let (party_type, party_name) = match kind {
        DocumentKind::Invoice => (PartyType::Customer, "Rahul Sharma"),
        DocumentKind::Purchase => (PartyType::Vendor, "Deccan Sports Supplies"),
    };
    let party = app
        .parties
        .create(
            tenant_id,
            &PartyInput {
                name: party_name.to_string(),
                phone: "9876543210".to_string(),
                address: "12 Stadium Road".to_string(),
                party_type,
            },
        )
        .await
        .expect("Failed to seed party");

    let item = app
        .items
        .create(
            tenant_id,
            &ItemInput {
                name: "Cricket Bat".to_string(),
                category: "Sports".to_string(),
                stock_quantity: 100,
                purchase_price: unit_price,
                selling_price: unit_price,
                gst_percentage: Decimal::ZERO,
                description: String::new(),
                images: Vec::new(),
            },
        )
        .await
        .expect("Failed to seed item");

    let input = DocumentInput {
        party_id: party.id.clone(),
        items: vec![LineItemInput {
            item_id: Some(item.id.clone()),
            quantity: 1,
            item_name: None,
            unit_price: None,
            gst_percentage: None,
        }],
        discount_percent: Decimal::ZERO,
        add_charges: Decimal::ZERO,
        round_off: Decimal::ZERO,
        paid_amount: Decimal::ZERO,
        note: String::new(),
    };

    let engine = match kind {
        DocumentKind::Invoice => &app.invoices,
        DocumentKind::Purchase => &app.purchases,
    };
    engine
        .create(tenant_id, &input)
        .await
        .expect("Failed to seed document")
}

/// A cash payment of `amount` against the given document.
pub fn payment_input(kind: DocumentKind, reference_id: &str, amount: Decimal) -> PaymentInput {
    PaymentInput {
        document_kind: kind,
        reference_id: reference_id.to_string(),
        payment_amount: amount,
        payment_mode: PaymentMode::Cash,
        note: String::new(),
    }
}

/// Reload a document of the given kind from the store.
pub async fn reload(
    app: &PaymentApp,
    tenant_id: Uuid,
    kind: DocumentKind,
    document_id: &str,
) -> TradeDocument {
    let engine = match kind {
        DocumentKind::Invoice => &app.invoices,
        DocumentKind::Purchase => &app.purchases,
    };
    engine
        .get(tenant_id, document_id)
        .await
        .expect("Failed to get document")
        .expect("Missing document")
}
