//! Tenant-scoped document store contract.
//!
//! Every collection is scoped to a single tenant; a [`CollectionPath`] names
//! one tenant's view of one collection (`tenant/{tenant_id}/items` and so
//! on). Implementations provide plain create/read/update/delete/scan calls
//! with no multi-document transaction; callers sequence their own writes.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::error::AppError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Stored document representation.
pub type Document = bson::Document;

/// Collections owned by a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Items,
    Parties,
    Invoices,
    Purchases,
    Payments,
    Counters,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Items => "items",
            CollectionKind::Parties => "parties",
            CollectionKind::Invoices => "invoices",
            CollectionKind::Purchases => "purchases",
            CollectionKind::Payments => "payments",
            CollectionKind::Counters => "counters",
        }
    }
}

/// One tenant's view of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionPath {
    tenant_id: Uuid,
    kind: CollectionKind,
}

impl CollectionPath {
    pub fn new(tenant_id: Uuid, kind: CollectionKind) -> Self {
        Self { tenant_id, kind }
    }

    pub fn items(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, CollectionKind::Items)
    }

    pub fn parties(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, CollectionKind::Parties)
    }

    pub fn invoices(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, CollectionKind::Invoices)
    }

    pub fn purchases(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, CollectionKind::Purchases)
    }

    pub fn payments(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, CollectionKind::Payments)
    }

    pub fn counters(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, CollectionKind::Counters)
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tenant/{}/{}", self.tenant_id, self.kind.as_str())
    }
}

/// Scan ordering for [`DocumentStore::list_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Ascending,
    Descending,
}

/// Minimal per-tenant document store.
///
/// `put` uses the document's `_id` when present and assigns a fresh UUID
/// otherwise. `update` merges the patch into the stored document and fails
/// with `NotFound` for an unknown id. `delete` is idempotent.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, AppError>;

    async fn put(&self, path: &CollectionPath, document: Document) -> Result<String, AppError>;

    async fn update(
        &self,
        path: &CollectionPath,
        id: &str,
        patch: Document,
    ) -> Result<(), AppError>;

    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<(), AppError>;

    async fn list_all(
        &self,
        path: &CollectionPath,
        order_by: Option<(&str, Sort)>,
    ) -> Result<Vec<Document>, AppError>;
}

/// Serialize a model into its stored document form.
pub fn encode<T: Serialize>(value: &T) -> Result<Document, AppError> {
    Ok(bson::to_document(value)?)
}

/// Serialize a single field value for use in an update patch.
pub fn encode_value<T: Serialize>(value: &T) -> Result<bson::Bson, AppError> {
    Ok(bson::to_bson(value)?)
}

/// Deserialize a stored document into a model.
pub fn decode<T: DeserializeOwned>(document: Document) -> Result<T, AppError> {
    Ok(bson::from_document(document)?)
}
