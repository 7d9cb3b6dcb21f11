//! Services module for shopbook-billing.

pub mod documents;
pub mod metrics;
pub mod numbering;
pub mod parties;

pub use documents::DocumentEngine;
pub use metrics::{get_metrics, init_metrics};
pub use numbering::{next_number, NumberAllocator, NumberSeries};
pub use parties::PartyService;
