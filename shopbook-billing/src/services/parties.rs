//! Party CRUD over the document store.

use crate::models::{Party, PartyInput};
use crate::services::metrics::{OP_DURATION, PARTIES_TOTAL};
use bson::doc;
use shopbook_core::error::AppError;
use shopbook_core::store::{self, CollectionPath, DocumentStore, Sort};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct PartyService {
    store: Arc<dyn DocumentStore>,
}

impl PartyService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new party.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id))]
    pub async fn create(&self, tenant_id: Uuid, input: &PartyInput) -> Result<Party, AppError> {
        input.validate()?;
        input.validate_phone()?;

        let timer = OP_DURATION
            .with_label_values(&["create", "party"])
            .start_timer();

        let now = bson::DateTime::now();
        let party = Party {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name: input.name.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            party_type: input.party_type,
            created_at: now,
            updated_at: now,
        };

        let path = CollectionPath::parties(tenant_id);
        self.store.put(&path, store::encode(&party)?).await?;

        timer.observe_duration();
        PARTIES_TOTAL.with_label_values(&["created"]).inc();

        info!(party_id = %party.id, party_type = party.party_type.as_str(), "Party created");

        Ok(party)
    }

    /// Get a party by ID.
    pub async fn get(&self, tenant_id: Uuid, party_id: &str) -> Result<Option<Party>, AppError> {
        let path = CollectionPath::parties(tenant_id);
        match self.store.get(&path, party_id).await? {
            Some(document) => Ok(Some(store::decode(document)?)),
            None => Ok(None),
        }
    }

    /// List all parties for a tenant, newest first.
    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Party>, AppError> {
        let timer = OP_DURATION
            .with_label_values(&["list", "party"])
            .start_timer();

        let path = CollectionPath::parties(tenant_id);
        let documents = self
            .store
            .list_all(&path, Some(("created_at", Sort::Descending)))
            .await?;

        timer.observe_duration();

        documents.into_iter().map(store::decode).collect()
    }

    /// Replace a party's fields, preserving `created_at`.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, party_id = %party_id))]
    pub async fn update(
        &self,
        tenant_id: Uuid,
        party_id: &str,
        input: &PartyInput,
    ) -> Result<Party, AppError> {
        input.validate()?;
        input.validate_phone()?;

        let timer = OP_DURATION
            .with_label_values(&["update", "party"])
            .start_timer();

        let existing = self.get(tenant_id, party_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Party {} does not exist", party_id))
        })?;

        let updated_at = bson::DateTime::now();
        let path = CollectionPath::parties(tenant_id);
        self.store
            .update(
                &path,
                party_id,
                doc! {
                    "name": input.name.clone(),
                    "phone": input.phone.clone(),
                    "address": input.address.clone(),
                    "party_type": store::encode_value(&input.party_type)?,
                    "updated_at": updated_at,
                },
            )
            .await?;

        timer.observe_duration();
        PARTIES_TOTAL.with_label_values(&["updated"]).inc();

        info!("Party updated");

        Ok(Party {
            id: existing.id,
            tenant_id,
            name: input.name.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            party_type: input.party_type,
            created_at: existing.created_at,
            updated_at,
        })
    }

    /// Delete a party.
    ///
    /// Documents written against the party keep their snapshotted name and
    /// type; the dangling reference is allowed.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, party_id = %party_id))]
    pub async fn delete(&self, tenant_id: Uuid, party_id: &str) -> Result<(), AppError> {
        let timer = OP_DURATION
            .with_label_values(&["delete", "party"])
            .start_timer();

        let path = CollectionPath::parties(tenant_id);
        self.store.delete(&path, party_id).await?;

        timer.observe_duration();
        PARTIES_TOTAL.with_label_values(&["deleted"]).inc();

        info!("Party deleted");

        Ok(())
    }
}
