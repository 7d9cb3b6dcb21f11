//! Payment ledger: apply and reverse payments against trade documents.
//!
//! A payment targets exactly one sales or purchase document. Applying it
//! raises the target's paid amount and recomputes due and status; reversal
//! is the algebraic inverse, so apply-then-reverse restores the target's
//! paid/due/status to their prior values.

use crate::models::{Payment, PaymentInput};
use crate::services::metrics::{OP_DURATION, PAYMENTS_TOTAL};
use bson::doc;
use rust_decimal::Decimal;
use shopbook_billing::models::{PaymentStatus, TradeDocument};
use shopbook_billing::services::{NumberAllocator, NumberSeries};
use shopbook_core::error::AppError;
use shopbook_core::store::{self, CollectionPath, DocumentStore, Sort};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct PaymentLedger {
    store: Arc<dyn DocumentStore>,
    numbers: NumberAllocator,
}

impl PaymentLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let numbers = NumberAllocator::new(store.clone());
        Self { store, numbers }
    }

    /// Apply a payment to its target document.
    ///
    /// Fails with `Overpayment` before any write when the amount exceeds the
    /// target's current due. On success the target carries the new
    /// paid/due/status and the payment record holds the target's pre-payment
    /// snapshot.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id))]
    pub async fn apply(&self, tenant_id: Uuid, input: &PaymentInput) -> Result<Payment, AppError> {
        input.validate()?;
        input.validate_amount()?;

        let timer = OP_DURATION.with_label_values(&["apply"]).start_timer();

        let target_path = input.document_kind.collection(tenant_id);
        let target = self.load_target(&target_path, &input.reference_id).await?;

        if input.payment_amount > target.due_amount {
            return Err(AppError::Overpayment {
                reference_id: input.reference_id.clone(),
                amount: input.payment_amount,
                due: target.due_amount,
            });
        }

        let new_paid = target.paid_amount + input.payment_amount;
        self.persist_target(&target_path, &target, new_paid).await?;

        let number = self
            .numbers
            .allocate(tenant_id, NumberSeries::Payments)
            .await?;
        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            number,
            document_kind: input.document_kind,
            reference_id: target.id.clone(),
            reference_number: target.number.clone(),
            party_name: target.party_name.clone(),
            total_amount: target.total_amount,
            paid_amount: target.paid_amount,
            due_amount: target.due_amount,
            payment_amount: input.payment_amount,
            payment_mode: input.payment_mode,
            note: input.note.clone(),
            created_at: bson::DateTime::now(),
        };

        self.store
            .put(
                &CollectionPath::payments(tenant_id),
                store::encode(&payment)?,
            )
            .await?;

        timer.observe_duration();
        PAYMENTS_TOTAL.with_label_values(&["applied"]).inc();

        info!(
            payment_id = %payment.id,
            number = %payment.number,
            reference = %payment.reference_number,
            "Payment applied"
        );

        Ok(payment)
    }

    /// Reverse a payment: restore its target and delete the record.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, payment_id = %payment_id))]
    pub async fn reverse(&self, tenant_id: Uuid, payment_id: &str) -> Result<(), AppError> {
        let timer = OP_DURATION.with_label_values(&["reverse"]).start_timer();

        let payment = self.load(tenant_id, payment_id).await?;
        let target_path = payment.document_kind.collection(tenant_id);
        let target = self
            .load_target(&target_path, &payment.reference_id)
            .await?;

        let new_paid = target.paid_amount - payment.payment_amount;
        self.persist_target(&target_path, &target, new_paid).await?;

        self.store
            .delete(&CollectionPath::payments(tenant_id), payment_id)
            .await?;

        timer.observe_duration();
        PAYMENTS_TOTAL.with_label_values(&["reversed"]).inc();

        info!(
            number = %payment.number,
            reference = %payment.reference_number,
            "Payment reversed"
        );

        Ok(())
    }

    /// Get a payment by ID.
    pub async fn get(
        &self,
        tenant_id: Uuid,
        payment_id: &str,
    ) -> Result<Option<Payment>, AppError> {
        let path = CollectionPath::payments(tenant_id);
        match self.store.get(&path, payment_id).await? {
            Some(document) => Ok(Some(store::decode(document)?)),
            None => Ok(None),
        }
    }

    /// List all payments for a tenant, newest first.
    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let timer = OP_DURATION.with_label_values(&["list"]).start_timer();

        let path = CollectionPath::payments(tenant_id);
        let documents = self
            .store
            .list_all(&path, Some(("created_at", Sort::Descending)))
            .await?;

        timer.observe_duration();

        documents.into_iter().map(store::decode).collect()
    }

    async fn load(&self, tenant_id: Uuid, payment_id: &str) -> Result<Payment, AppError> {
        self.get(tenant_id, payment_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Payment {} does not exist", payment_id))
        })
    }

    async fn load_target(
        &self,
        path: &CollectionPath,
        reference_id: &str,
    ) -> Result<TradeDocument, AppError> {
        let document = self.store.get(path, reference_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Document {} does not exist", reference_id))
        })?;
        store::decode(document)
    }

    /// Write the target's new paid amount plus the due and status derived
    /// from it.
    async fn persist_target(
        &self,
        path: &CollectionPath,
        target: &TradeDocument,
        new_paid: Decimal,
    ) -> Result<(), AppError> {
        let new_due = target.total_amount - new_paid;
        let status = PaymentStatus::from_amounts(new_paid, target.total_amount);

        self.store
            .update(
                path,
                &target.id,
                doc! {
                    "paid_amount": store::encode_value(&new_paid)?,
                    "due_amount": store::encode_value(&new_due)?,
                    "payment_status": store::encode_value(&status)?,
                    "updated_at": bson::DateTime::now(),
                },
            )
            .await
    }
}
