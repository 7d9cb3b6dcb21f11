//! Payment model: one application of money against one document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopbook_billing::models::DocumentKind;
use shopbook_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Upi,
    BankTransfer,
    Card,
    Cheque,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::BankTransfer => "Bank Transfer",
            PaymentMode::Card => "Card",
            PaymentMode::Cheque => "Cheque",
        }
    }
}

/// A recorded payment against exactly one sales or purchase document.
///
/// `reference_number`, `party_name`, and the three amount fields are
/// snapshots of the target taken before the payment was applied. The record
/// is created by apply and deleted by reverse; it is never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    pub tenant_id: Uuid,
    pub number: String,
    pub document_kind: DocumentKind,
    pub reference_id: String,
    pub reference_number: String,
    pub party_name: String,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    pub payment_amount: Decimal,
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub note: String,
    pub created_at: bson::DateTime,
}

/// Input for applying a payment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentInput {
    pub document_kind: DocumentKind,
    #[validate(length(min = 1, message = "Reference document is required"))]
    pub reference_id: String,
    pub payment_amount: Decimal,
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub note: String,
}

impl PaymentInput {
    /// Amount rule the derive cannot express on `Decimal` values.
    pub fn validate_amount(&self) -> Result<(), AppError> {
        if self.payment_amount <= Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payment amount must be greater than 0"
            )));
        }
        Ok(())
    }
}
