use super::{CollectionKind, CollectionPath, Document, DocumentStore, Sort};
use crate::config::StoreSettings;
use crate::error::AppError;
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, FindOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{info, instrument};
use uuid::Uuid;

/// MongoDB-backed [`DocumentStore`].
///
/// One MongoDB collection per [`CollectionKind`]; tenant scoping is a
/// `tenant_id` field on every stored document, enforced by the filter on
/// every read and write.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

const ALL_KINDS: [CollectionKind; 6] = [
    CollectionKind::Items,
    CollectionKind::Parties,
    CollectionKind::Invoices,
    CollectionKind::Purchases,
    CollectionKind::Payments,
    CollectionKind::Counters,
];

impl MongoStore {
    /// Connect to the configured MongoDB deployment.
    #[instrument(skip(settings), fields(database = %settings.database))]
    pub async fn connect(settings: &StoreSettings) -> Result<Self, AppError> {
        let options = ClientOptions::parse(&settings.uri).await?;
        let client = Client::with_options(options)?;
        let db = client.database(&settings.database);

        info!("Connected to MongoDB");

        Ok(Self { db })
    }

    /// Initialize indexes for tenant-scoped lookups and scans.
    pub async fn init_indexes(&self) -> Result<(), AppError> {
        for kind in ALL_KINDS {
            let tenant_scope_index = IndexModel::builder()
                .keys(doc! { "tenant_id": 1, "_id": 1 })
                .options(
                    IndexOptions::builder()
                        .name("tenant_scope_idx".to_string())
                        .build(),
                )
                .build();

            let tenant_created_index = IndexModel::builder()
                .keys(doc! { "tenant_id": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("tenant_created_idx".to_string())
                        .build(),
                )
                .build();

            self.db
                .collection::<Document>(kind.as_str())
                .create_indexes([tenant_scope_index, tenant_created_index], None)
                .await?;
        }

        info!("Document store indexes initialized");
        Ok(())
    }

    fn collection(&self, path: &CollectionPath) -> Collection<Document> {
        self.db.collection(path.kind().as_str())
    }

    fn scoped_filter(path: &CollectionPath, id: &str) -> Document {
        doc! {
            "_id": id,
            "tenant_id": path.tenant_id().to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, AppError> {
        let document = self
            .collection(path)
            .find_one(Self::scoped_filter(path, id), None)
            .await?;
        Ok(document)
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
        document.insert("tenant_id", path.tenant_id().to_string());

        self.collection(path).insert_one(document, None).await?;
        Ok(id)
    }

    async fn update(
        &self,
        path: &CollectionPath,
        id: &str,
        patch: Document,
    ) -> Result<(), AppError> {
        let result = self
            .collection(path)
            .update_one(Self::scoped_filter(path, id), doc! { "$set": patch }, None)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "Document {} does not exist in {}",
                id,
                path
            )));
        }
        Ok(())
    }

    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<(), AppError> {
        self.collection(path)
            .delete_one(Self::scoped_filter(path, id), None)
            .await?;
        Ok(())
    }

    async fn list_all(
        &self,
        path: &CollectionPath,
        order_by: Option<(&str, Sort)>,
    ) -> Result<Vec<Document>, AppError> {
        let filter = doc! { "tenant_id": path.tenant_id().to_string() };
        let options = order_by.map(|(field, direction)| {
            let order = match direction {
                Sort::Ascending => 1,
                Sort::Descending => -1,
            };
            let mut sort = Document::new();
            sort.insert(field, order);
            FindOptions::builder().sort(sort).build()
        });

        let cursor = self.collection(path).find(filter, options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }
}
