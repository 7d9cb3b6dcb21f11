//! Services module for shopbook-inventory.

pub mod items;
pub mod metrics;
pub mod stock;

pub use items::ItemService;
pub use metrics::{get_metrics, init_metrics};
pub use stock::StockLedger;
