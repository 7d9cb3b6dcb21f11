//! shopbook-core: Shared infrastructure for the shopbook workspace.
pub mod config;
pub mod error;
pub mod observability;
pub mod store;

pub use async_trait;
pub use bson;
pub use mongodb;
pub use serde;
pub use tracing;
pub use validator;
