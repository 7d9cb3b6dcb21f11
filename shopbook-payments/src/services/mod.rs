//! Services module for shopbook-payments.

pub mod metrics;
pub mod payments;

pub use metrics::{get_metrics, init_metrics};
pub use payments::PaymentLedger;
