//! Common seeding helpers for workflow tests.
//!
//! Shared across suites; not every suite uses every helper.
#![allow(dead_code)]

use rust_decimal::Decimal;
use shopbook_billing::models::{
    DocumentInput, DocumentKind, LineItemInput, Party, PartyInput, PartyType,
};
use shopbook_inventory::models::{Item, ItemInput};
use shopbook_payments::models::{PaymentInput, PaymentMode};
use uuid::Uuid;
use workflow_tests::ShopbookApp;

/// Seed an item with the given stock and prices (selling, purchase, GST %).
pub async fn seed_item(
    app: &ShopbookApp,
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
    app: &ShopbookApp,
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

/// Current stock level of an item.
pub async fn stock_of(app: &ShopbookApp, tenant_id: Uuid, item_id: &str) -> i64 {
    app.items
        .get(tenant_id, item_id)
        .await
        .expect("Failed to get item")
        .expect("Missing item")
        .stock_quantity
}
