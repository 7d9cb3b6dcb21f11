//! Prometheus metrics for shopbook-billing.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder};

/// Operation duration histogram by operation and document kind.
pub static OP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "billing_operation_duration_seconds",
        "Billing operation duration in seconds",
        &["operation", "kind"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register billing_operation_duration_seconds")
});

/// Document mutation counter by kind and operation.
pub static DOCUMENTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "billing_documents_total",
        "Total number of document mutations by kind and operation",
        &["kind", "operation"] // created, updated, deleted
    )
    .expect("Failed to register billing_documents_total")
});

/// Party mutation counter by operation.
pub static PARTIES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "billing_parties_total",
        "Total number of party mutations by operation",
        &["operation"] // created, updated, deleted
    )
    .expect("Failed to register billing_parties_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&OP_DURATION);
    Lazy::force(&DOCUMENTS_TOTAL);
    Lazy::force(&PARTIES_TOTAL);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
