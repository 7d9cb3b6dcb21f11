//! Sequential human-readable numbering for documents and payments.
//!
//! Numbers have the form `{PREFIX}-{NNNNN}` (`INV-00001`, `PUR-00007`,
//! `PAY-00012`). Allocation keeps a counter document per tenant and series;
//! the first allocation for a series seeds the counter from the numbers
//! already present in the collection, so pre-existing data keeps its
//! sequence. The counter update is a read-then-write under the minimal
//! store interface, so concurrent creators can still collide.

use bson::doc;
use shopbook_core::error::AppError;
use shopbook_core::store::{CollectionPath, DocumentStore};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Number series, one counter per tenant each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberSeries {
    Invoices,
    Purchases,
    Payments,
}

impl NumberSeries {
    pub fn prefix(&self) -> &'static str {
        match self {
            NumberSeries::Invoices => "INV",
            NumberSeries::Purchases => "PUR",
            NumberSeries::Payments => "PAY",
        }
    }

    pub fn collection(&self, tenant_id: Uuid) -> CollectionPath {
        match self {
            NumberSeries::Invoices => CollectionPath::invoices(tenant_id),
            NumberSeries::Purchases => CollectionPath::purchases(tenant_id),
            NumberSeries::Payments => CollectionPath::payments(tenant_id),
        }
    }

    fn counter_id(&self) -> &'static str {
        match self {
            NumberSeries::Invoices => "invoices",
            NumberSeries::Purchases => "purchases",
            NumberSeries::Payments => "payments",
        }
    }
}

fn format_number(prefix: &str, value: i64) -> String {
    format!("{}-{:05}", prefix, value)
}

/// Numeric suffix of `number` after `{prefix}-`; unparseable values count
/// as 0.
pub fn numeric_suffix(prefix: &str, number: &str) -> i64 {
    number
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(0)
}

fn highest_suffix(prefix: &str, existing: &[String]) -> i64 {
    existing
        .iter()
        .map(|number| numeric_suffix(prefix, number))
        .max()
        .unwrap_or(0)
}

/// Next number in a sequence of existing numbers: `{prefix}-{max+1}`,
/// zero-padded to 5 digits; `{prefix}-00001` when none exist.
pub fn next_number(prefix: &str, existing: &[String]) -> String {
    format_number(prefix, highest_suffix(prefix, existing) + 1)
}

/// Allocates sequential numbers backed by per-tenant counter documents.
#[derive(Clone)]
pub struct NumberAllocator {
    store: Arc<dyn DocumentStore>,
}

impl NumberAllocator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn allocate(
        &self,
        tenant_id: Uuid,
        series: NumberSeries,
    ) -> Result<String, AppError> {
        let counters = CollectionPath::counters(tenant_id);
        let counter_id = series.counter_id();

        let next = match self.store.get(&counters, counter_id).await? {
            Some(counter) => {
                let last = counter.get_i64("last_number").map_err(|e| {
                    AppError::StoreError(anyhow::anyhow!(
                        "Counter {} is corrupted: {}",
                        counter_id,
                        e
                    ))
                })?;
                let next = last + 1;
                self.store
                    .update(
                        &counters,
                        counter_id,
                        doc! {
                            "last_number": next,
                            "updated_at": bson::DateTime::now(),
                        },
                    )
                    .await?;
                next
            }
            None => {
                let documents = self
                    .store
                    .list_all(&series.collection(tenant_id), None)
                    .await?;
                let numbers: Vec<String> = documents
                    .iter()
                    .filter_map(|document| document.get_str("number").ok())
                    .map(String::from)
                    .collect();
                let next = highest_suffix(series.prefix(), &numbers) + 1;
                self.store
                    .put(
                        &counters,
                        doc! {
                            "_id": counter_id,
                            "last_number": next,
                            "updated_at": bson::DateTime::now(),
                        },
                    )
                    .await?;
                info!(series = counter_id, seeded_to = next, "Number counter seeded");
                next
            }
        };

        Ok(format_number(series.prefix(), next))
    }
}
