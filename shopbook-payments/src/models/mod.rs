//! Domain models for shopbook-payments.

mod payment;

pub use payment::{Payment, PaymentInput, PaymentMode};
