//! Smoke test: the engines wire up over a fresh store and start empty.

mod common;

use common::seed_item;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;
use workflow_tests::spawn_app;

#[tokio::test]
async fn fresh_tenant_has_no_records() {
    let (app, tenant_id) = spawn_app();

    assert!(app
        .items
        .list(tenant_id)
        .await
        .expect("Failed to list items")
        .is_empty());
    assert!(app
        .parties
        .list(tenant_id)
        .await
        .expect("Failed to list parties")
        .is_empty());
    assert!(app
        .invoices
        .list(tenant_id)
        .await
        .expect("Failed to list invoices")
        .is_empty());
    assert!(app
        .purchases
        .list(tenant_id)
        .await
        .expect("Failed to list purchases")
        .is_empty());
    assert!(app
        .payments
        .list(tenant_id)
        .await
        .expect("Failed to list payments")
        .is_empty());
}

#[tokio::test]
async fn tenants_do_not_see_each_other() {
    let (app, tenant_a) = spawn_app();
    let tenant_b = Uuid::new_v4();

    seed_item(&app, tenant_a, "Football", 10, dec!(100), dec!(80), Decimal::ZERO).await;

    assert_eq!(
        app.items
            .list(tenant_a)
            .await
            .expect("Failed to list items")
            .len(),
        1
    );
    assert!(app
        .items
        .list(tenant_b)
        .await
        .expect("Failed to list items")
        .is_empty());
}
