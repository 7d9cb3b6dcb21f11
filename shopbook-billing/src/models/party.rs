//! Party model: the customers and vendors documents are written against.

use serde::{Deserialize, Serialize};
use shopbook_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyType {
    Customer,
    Vendor,
}

impl PartyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyType::Customer => "Customer",
            PartyType::Vendor => "Vendor",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "_id")]
    pub id: String,
    pub tenant_id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub party_type: PartyType,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Input for creating or replacing a party.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PartyInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(equal = 10, message = "Phone number must be 10 digits"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub party_type: PartyType,
}

impl PartyInput {
    pub fn validate_phone(&self) -> Result<(), AppError> {
        if !self.phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Phone number must be 10 digits"
            )));
        }
        Ok(())
    }
}
