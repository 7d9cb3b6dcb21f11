//! Sales and purchase documents, sequential numbering, and parties.
pub mod models;
pub mod services;
