//! Prometheus metrics for shopbook-inventory.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder};

/// Operation duration histogram by operation name.
pub static OP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "inventory_operation_duration_seconds",
        "Inventory operation duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register inventory_operation_duration_seconds")
});

/// Stock movement counter by direction.
pub static STOCK_MOVEMENTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "inventory_stock_movements_total",
        "Total number of stock ledger adjustments",
        &["direction"] // in, out
    )
    .expect("Failed to register inventory_stock_movements_total")
});

/// Item mutation counter by operation.
pub static ITEMS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "inventory_items_total",
        "Total number of item mutations by operation",
        &["operation"] // created, updated, deleted
    )
    .expect("Failed to register inventory_items_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&OP_DURATION);
    Lazy::force(&STOCK_MOVEMENTS_TOTAL);
    Lazy::force(&ITEMS_TOTAL);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
