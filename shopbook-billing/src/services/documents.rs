//! Sales and purchase document engine.
//!
//! One engine serves both document kinds; an invoice deducts stock where a
//! purchase adds it, and each snapshots the kind-appropriate item price.
//! Edits are modeled as "undo the old stock effect, apply the new one"
//! rather than diffing line items, so an update issues one inverse call per
//! old line and one forward call per new line.

use crate::models::{
    DocumentInput, DocumentKind, LineItem, LineItemInput, Party, PaymentStatus, Totals,
    TradeDocument,
};
use crate::models::compute_amount;
use crate::services::metrics::{DOCUMENTS_TOTAL, OP_DURATION};
use crate::services::numbering::{NumberAllocator, NumberSeries};
use rust_decimal::Decimal;
use shopbook_core::error::AppError;
use shopbook_core::store::{self, CollectionPath, DocumentStore, Sort};
use shopbook_inventory::models::Item;
use shopbook_inventory::services::stock::StockLedger;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct DocumentEngine {
    store: Arc<dyn DocumentStore>,
    stock: StockLedger,
    numbers: NumberAllocator,
    kind: DocumentKind,
}

impl DocumentEngine {
    pub fn new(store: Arc<dyn DocumentStore>, kind: DocumentKind) -> Self {
        let stock = StockLedger::new(store.clone());
        let numbers = NumberAllocator::new(store.clone());
        Self {
            store,
            stock,
            numbers,
            kind,
        }
    }

    /// Engine over the tenant's invoices.
    pub fn invoices(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, DocumentKind::Invoice)
    }

    /// Engine over the tenant's purchases.
    pub fn purchases(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, DocumentKind::Purchase)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    fn series(&self) -> NumberSeries {
        match self.kind {
            DocumentKind::Invoice => NumberSeries::Invoices,
            DocumentKind::Purchase => NumberSeries::Purchases,
        }
    }

    /// Create a document: snapshot party and items, move stock, compute
    /// totals, allocate a number, persist.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, kind = self.kind.as_str()))]
    pub async fn create(
        &self,
        tenant_id: Uuid,
        input: &DocumentInput,
    ) -> Result<TradeDocument, AppError> {
        input.validate()?;
        input.validate_fields()?;

        let timer = OP_DURATION
            .with_label_values(&["create", self.kind.as_str()])
            .start_timer();

        let party = self.load_party(tenant_id, &input.party_id).await?;
        let lines = self.resolve_lines(tenant_id, &input.items).await?;
        let totals = Totals::compute(
            &lines,
            input.discount_percent,
            input.add_charges,
            input.round_off,
        );
        validate_paid_amount(input.paid_amount, totals.total_amount)?;

        self.apply_deltas(tenant_id, &stock_deltas(&lines, self.kind.stock_sign()))
            .await?;

        let number = self.numbers.allocate(tenant_id, self.series()).await?;
        let now = bson::DateTime::now();
        let document = TradeDocument {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            number,
            party_id: party.id.clone(),
            party_name: party.name.clone(),
            party_type: party.party_type,
            items: lines,
            subtotal: totals.subtotal,
            discount_percent: input.discount_percent,
            discount_amount: totals.discount_amount,
            add_charges: input.add_charges,
            round_off: input.round_off,
            total_amount: totals.total_amount,
            paid_amount: input.paid_amount,
            due_amount: totals.total_amount - input.paid_amount,
            payment_status: PaymentStatus::from_amounts(input.paid_amount, totals.total_amount),
            note: input.note.clone(),
            created_at: now,
            updated_at: now,
        };

        self.store
            .put(&self.kind.collection(tenant_id), store::encode(&document)?)
            .await?;

        timer.observe_duration();
        DOCUMENTS_TOTAL
            .with_label_values(&[self.kind.as_str(), "created"])
            .inc();

        info!(document_id = %document.id, number = %document.number, "Document created");

        Ok(document)
    }

    /// Replace a document: restore stock as if it never existed, then apply
    /// the new lines, recompute totals, and persist over the same id.
    /// `number` and `created_at` are preserved.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, document_id = %document_id, kind = self.kind.as_str()))]
    pub async fn update(
        &self,
        tenant_id: Uuid,
        document_id: &str,
        input: &DocumentInput,
    ) -> Result<TradeDocument, AppError> {
        input.validate()?;
        input.validate_fields()?;

        let timer = OP_DURATION
            .with_label_values(&["update", self.kind.as_str()])
            .start_timer();

        let existing = self.load(tenant_id, document_id).await?;
        let party = self.load_party(tenant_id, &input.party_id).await?;
        let lines = self.resolve_lines(tenant_id, &input.items).await?;
        let totals = Totals::compute(
            &lines,
            input.discount_percent,
            input.add_charges,
            input.round_off,
        );
        validate_paid_amount(input.paid_amount, totals.total_amount)?;

        let mut deltas = stock_deltas(&existing.items, -self.kind.stock_sign());
        deltas.extend(stock_deltas(&lines, self.kind.stock_sign()));
        self.apply_deltas(tenant_id, &deltas).await?;

        let updated_at = bson::DateTime::now();
        let document = TradeDocument {
            id: existing.id.clone(),
            tenant_id,
            number: existing.number.clone(),
            party_id: party.id.clone(),
            party_name: party.name.clone(),
            party_type: party.party_type,
            items: lines,
            subtotal: totals.subtotal,
            discount_percent: input.discount_percent,
            discount_amount: totals.discount_amount,
            add_charges: input.add_charges,
            round_off: input.round_off,
            total_amount: totals.total_amount,
            paid_amount: input.paid_amount,
            due_amount: totals.total_amount - input.paid_amount,
            payment_status: PaymentStatus::from_amounts(input.paid_amount, totals.total_amount),
            note: input.note.clone(),
            created_at: existing.created_at,
            updated_at,
        };

        let mut patch = store::encode(&document)?;
        patch.remove("_id");
        self.store
            .update(&self.kind.collection(tenant_id), document_id, patch)
            .await?;

        timer.observe_duration();
        DOCUMENTS_TOTAL
            .with_label_values(&[self.kind.as_str(), "updated"])
            .inc();

        info!(number = %document.number, "Document updated");

        Ok(document)
    }

    /// Delete a document, restoring stock to its pre-document state.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, document_id = %document_id, kind = self.kind.as_str()))]
    pub async fn delete(&self, tenant_id: Uuid, document_id: &str) -> Result<(), AppError> {
        let timer = OP_DURATION
            .with_label_values(&["delete", self.kind.as_str()])
            .start_timer();

        let existing = self.load(tenant_id, document_id).await?;

        self.apply_deltas(
            tenant_id,
            &stock_deltas(&existing.items, -self.kind.stock_sign()),
        )
        .await?;

        self.store
            .delete(&self.kind.collection(tenant_id), document_id)
            .await?;

        timer.observe_duration();
        DOCUMENTS_TOTAL
            .with_label_values(&[self.kind.as_str(), "deleted"])
            .inc();

        info!(number = %existing.number, "Document deleted");

        Ok(())
    }

    /// Get a document by ID.
    pub async fn get(
        &self,
        tenant_id: Uuid,
        document_id: &str,
    ) -> Result<Option<TradeDocument>, AppError> {
        let path = self.kind.collection(tenant_id);
        match self.store.get(&path, document_id).await? {
            Some(document) => Ok(Some(store::decode(document)?)),
            None => Ok(None),
        }
    }

    /// List all documents of this kind for a tenant, newest first.
    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<TradeDocument>, AppError> {
        let timer = OP_DURATION
            .with_label_values(&["list", self.kind.as_str()])
            .start_timer();

        let documents = self
            .store
            .list_all(
                &self.kind.collection(tenant_id),
                Some(("created_at", Sort::Descending)),
            )
            .await?;

        timer.observe_duration();

        documents.into_iter().map(store::decode).collect()
    }

    async fn load(&self, tenant_id: Uuid, document_id: &str) -> Result<TradeDocument, AppError> {
        self.get(tenant_id, document_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!(
                "{} {} does not exist",
                self.kind.as_str(),
                document_id
            ))
        })
    }

    async fn load_party(&self, tenant_id: Uuid, party_id: &str) -> Result<Party, AppError> {
        let path = CollectionPath::parties(tenant_id);
        let document = self.store.get(&path, party_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Party {} does not exist", party_id))
        })?;
        store::decode(document)
    }

    /// Turn line inputs into stored lines, snapshotting item name, the
    /// kind-appropriate price, and GST from the Item record. Lines without
    /// an item reference keep their own values.
    async fn resolve_lines(
        &self,
        tenant_id: Uuid,
        inputs: &[LineItemInput],
    ) -> Result<Vec<LineItem>, AppError> {
        let mut lines = Vec::with_capacity(inputs.len());
        for input in inputs {
            let line = match &input.item_id {
                Some(item_id) => {
                    let path = CollectionPath::items(tenant_id);
                    let document = self.store.get(&path, item_id).await?.ok_or_else(|| {
                        AppError::NotFound(anyhow::anyhow!("Item {} does not exist", item_id))
                    })?;
                    let item: Item = store::decode(document)?;
                    let unit_price = self.kind.unit_price(&item);
                    LineItem {
                        item_id: Some(item.id.clone()),
                        item_name: item.name.clone(),
                        quantity: input.quantity,
                        unit_price,
                        gst_percentage: item.gst_percentage,
                        amount: compute_amount(input.quantity, unit_price, item.gst_percentage),
                    }
                }
                None => {
                    let item_name = input.item_name.clone().unwrap_or_default();
                    let unit_price = input.unit_price.unwrap_or(Decimal::ZERO);
                    let gst_percentage = input.gst_percentage.unwrap_or(Decimal::ZERO);
                    LineItem {
                        item_id: None,
                        item_name,
                        quantity: input.quantity,
                        unit_price,
                        gst_percentage,
                        amount: compute_amount(input.quantity, unit_price, gst_percentage),
                    }
                }
            };
            lines.push(line);
        }
        Ok(lines)
    }

    /// Apply stock deltas in sequence. On failure, the deltas already
    /// applied within this call are undone before the error is returned;
    /// an undo failure is logged and does not mask the original error.
    async fn apply_deltas(
        &self,
        tenant_id: Uuid,
        deltas: &[(String, i64)],
    ) -> Result<(), AppError> {
        let mut applied: Vec<(String, i64)> = Vec::with_capacity(deltas.len());
        for (item_id, delta) in deltas {
            match self.stock.apply_delta(tenant_id, item_id, *delta).await {
                Ok(_) => applied.push((item_id.clone(), *delta)),
                Err(err) => {
                    for (applied_id, applied_delta) in applied.iter().rev() {
                        if let Err(undo_err) = self
                            .stock
                            .apply_delta(tenant_id, applied_id, -applied_delta)
                            .await
                        {
                            warn!(
                                item_id = %applied_id,
                                error = %undo_err,
                                "Failed to undo stock adjustment after error"
                            );
                        }
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

fn stock_deltas(lines: &[LineItem], sign: i64) -> Vec<(String, i64)> {
    lines
        .iter()
        .filter_map(|line| {
            line.item_id
                .as_ref()
                .map(|item_id| (item_id.clone(), sign * line.quantity))
        })
        .collect()
}

fn validate_paid_amount(paid_amount: Decimal, total_amount: Decimal) -> Result<(), AppError> {
    if paid_amount < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Paid amount cannot be negative"
        )));
    }
    if paid_amount > total_amount {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Paid amount cannot exceed total amount"
        )));
    }
    Ok(())
}
