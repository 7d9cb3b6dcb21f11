//! Payment ledger over sales and purchase documents.
pub mod models;
pub mod services;
