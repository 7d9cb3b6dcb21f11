//! Domain models for shopbook-inventory.

mod item;

pub use item::{Item, ItemImage, ItemInput};
