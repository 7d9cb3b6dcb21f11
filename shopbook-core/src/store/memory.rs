use super::{CollectionPath, Document, DocumentStore, Sort};
use crate::error::AppError;
use async_trait::async_trait;
use bson::Bson;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory [`DocumentStore`] used by tests and local tooling.
///
/// Documents are kept per collection path, so tenant isolation falls out of
/// the path structure itself.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, BTreeMap<String, Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::Int32(x)), Some(Bson::Int32(y))) => x.cmp(y),
        (Some(Bson::Int64(x)), Some(Bson::Int64(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, AppError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&path.to_string())
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn put(&self, path: &CollectionPath, mut document: Document) -> Result<String, AppError> {
        let id = match document.get_str("_id") {
            Ok(id) => id.to_string(),
            Err(_) => {
                let id = Uuid::new_v4().to_string();
                document.insert("_id", id.clone());
                id
            }
        };

        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(path.to_string())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn update(
        &self,
        path: &CollectionPath,
        id: &str,
        patch: Document,
    ) -> Result<(), AppError> {
        let mut collections = self.collections.lock().unwrap();
        let existing = collections
            .get_mut(&path.to_string())
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("Document {} does not exist in {}", id, path))
            })?;

        for (key, value) in patch {
            existing.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<(), AppError> {
        let mut collections = self.collections.lock().unwrap();
        if let Some(docs) = collections.get_mut(&path.to_string()) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list_all(
        &self,
        path: &CollectionPath,
        order_by: Option<(&str, Sort)>,
    ) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.lock().unwrap();
        let mut documents: Vec<Document> = collections
            .get(&path.to_string())
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();

        if let Some((field, direction)) = order_by {
            documents.sort_by(|a, b| {
                let ordering = compare_field(a, b, field);
                match direction {
                    Sort::Ascending => ordering,
                    Sort::Descending => ordering.reverse(),
                }
            });
        }

        Ok(documents)
    }
}
