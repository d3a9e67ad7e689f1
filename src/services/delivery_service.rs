//! Domain service for delivery order management.
//!
//! Handlers hand the raw request body to the service as a [`DeliveryDraft`];
//! the service owns presence and shape validation so every caller gets the
//! same rules.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DeliveryId, DeliveryStatus};
use crate::models::delivery::{Delivery, DeliveryInput};
use crate::services::validation::present;

pub const MISSING_FIELDS: &str = "All required fields must be filled";

/// Domain errors for delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Delivery {id} was modified concurrently (expected revision {expected}, found {current})")]
    StaleRevision {
        id: DeliveryId,
        expected: i32,
        current: i32,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for DeliveryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for DeliveryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Quantity as sent by clients: form inputs often submit numbers as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuantityField {
    Number(i64),
    Text(String),
}

/// Unvalidated delivery fields, as decoded from a request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeliveryDraft {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<QuantityField>,
    pub delivery_date: Option<String>,
    pub special_instructions: Option<String>,
    pub status: Option<String>,

    /// When set on an update, the write only applies if the stored revision matches.
    pub revision: Option<i32>,
}

impl DeliveryDraft {
    /// Validation for a new order. New orders always start as `pending`, so
    /// any status in the body is ignored rather than parsed.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Validation`] naming the first problem found.
    pub fn validate_new(mut self) -> Result<DeliveryInput, DeliveryError> {
        self.status = None;
        self.validate()
    }

    /// Checks the seven required fields, then their shapes.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Validation`] naming the first problem found.
    pub fn validate(self) -> Result<DeliveryInput, DeliveryError> {
        let quantity = match self.quantity {
            Some(QuantityField::Number(0)) | None => None,
            Some(QuantityField::Text(text)) => present(Some(text)),
            Some(QuantityField::Number(n)) => Some(n.to_string()),
        };

        let (
            Some(customer_name),
            Some(customer_email),
            Some(customer_phone),
            Some(delivery_address),
            Some(product_name),
            Some(quantity),
            Some(delivery_date),
        ) = (
            present(self.customer_name),
            present(self.customer_email),
            present(self.customer_phone),
            present(self.delivery_address),
            present(self.product_name),
            quantity,
            present(self.delivery_date),
        )
        else {
            return Err(DeliveryError::Validation(MISSING_FIELDS.to_string()));
        };

        Ok(DeliveryInput {
            customer_name,
            customer_email,
            customer_phone,
            delivery_address,
            product_name,
            quantity: parse_quantity(&quantity)?,
            delivery_date: parse_delivery_date(&delivery_date)?,
            special_instructions: present(self.special_instructions),
            status: parse_status(self.status)?.unwrap_or_default(),
        })
    }
}

fn parse_quantity(raw: &str) -> Result<i32, DeliveryError> {
    match raw.trim().parse::<i32>() {
        Ok(0) => Err(DeliveryError::Validation(MISSING_FIELDS.to_string())),
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DeliveryError::Validation(format!(
            "Invalid quantity '{raw}'. Quantity must be a positive whole number"
        ))),
    }
}

fn parse_delivery_date(raw: &str) -> Result<NaiveDate, DeliveryError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        DeliveryError::Validation(format!(
            "Invalid delivery_date '{raw}'. Expected YYYY-MM-DD"
        ))
    })
}

/// Blank or missing status is `None`; anything else must be a known value.
pub fn parse_status(raw: Option<String>) -> Result<Option<DeliveryStatus>, DeliveryError> {
    present(raw)
        .map(|s| s.parse::<DeliveryStatus>())
        .transpose()
        .map_err(|e| DeliveryError::Validation(e.to_string()))
}

/// Domain service trait for delivery orders.
#[async_trait::async_trait]
pub trait DeliveryService: Send + Sync {
    /// Validates and stores a new order with status `pending`.
    async fn create(&self, draft: DeliveryDraft) -> Result<DeliveryId, DeliveryError>;

    /// All orders, most recently created first.
    async fn list(&self) -> Result<Vec<Delivery>, DeliveryError>;

    /// Replaces every mutable field. Unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::StaleRevision`] when the draft carries a
    /// revision that no longer matches the stored row.
    async fn update_full(&self, id: DeliveryId, draft: DeliveryDraft)
    -> Result<(), DeliveryError>;

    /// Changes only the status. Unknown ids are a silent no-op.
    async fn update_status(
        &self,
        id: DeliveryId,
        status: Option<String>,
    ) -> Result<(), DeliveryError>;

    /// Removes the order. Unknown ids are a silent no-op.
    async fn delete(&self, id: DeliveryId) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_draft() -> DeliveryDraft {
        DeliveryDraft {
            customer_name: Some("Alice".to_string()),
            customer_email: Some("a@x.com".to_string()),
            customer_phone: Some("555".to_string()),
            delivery_address: Some("1 Main St".to_string()),
            product_name: Some("Widget".to_string()),
            quantity: Some(QuantityField::Number(3)),
            delivery_date: Some("2025-01-10".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn complete_draft_validates_with_defaults() {
        let input = alice_draft().validate().unwrap();
        assert_eq!(input.quantity, 3);
        assert_eq!(
            input.delivery_date,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert_eq!(input.status, DeliveryStatus::Pending);
        assert_eq!(input.special_instructions, None);
    }

    #[test]
    fn each_missing_required_field_is_rejected() {
        let strip: [fn(&mut DeliveryDraft); 7] = [
            |d| d.customer_name = None,
            |d| d.customer_email = None,
            |d| d.customer_phone = Some(String::new()),
            |d| d.delivery_address = None,
            |d| d.product_name = Some(String::new()),
            |d| d.quantity = Some(QuantityField::Number(0)),
            |d| d.delivery_date = None,
        ];

        for remove in strip {
            let mut draft = alice_draft();
            remove(&mut draft);
            match draft.validate() {
                Err(DeliveryError::Validation(msg)) => assert_eq!(msg, MISSING_FIELDS),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn quantity_accepts_numeric_strings() {
        let mut draft = alice_draft();
        draft.quantity = Some(QuantityField::Text(" 12 ".to_string()));
        assert_eq!(draft.validate().unwrap().quantity, 12);
    }

    #[test]
    fn quantity_rejects_negative_and_garbage() {
        for bad in [QuantityField::Number(-2), QuantityField::Text("lots".to_string())] {
            let mut draft = alice_draft();
            draft.quantity = Some(bad);
            assert!(matches!(draft.validate(), Err(DeliveryError::Validation(_))));
        }
    }

    #[test]
    fn bad_date_and_status_are_rejected() {
        let mut draft = alice_draft();
        draft.delivery_date = Some("10/01/2025".to_string());
        assert!(matches!(draft.validate(), Err(DeliveryError::Validation(_))));

        let mut draft = alice_draft();
        draft.status = Some("lost".to_string());
        assert!(matches!(draft.validate(), Err(DeliveryError::Validation(_))));
    }

    #[test]
    fn explicit_status_and_instructions_are_kept() {
        let mut draft = alice_draft();
        draft.status = Some("delivered".to_string());
        draft.special_instructions = Some("Leave at door".to_string());
        let input = draft.validate().unwrap();
        assert_eq!(input.status, DeliveryStatus::Delivered);
        assert_eq!(input.special_instructions.as_deref(), Some("Leave at door"));
    }

    #[test]
    fn new_orders_ignore_body_status() {
        for status in ["delivered", "shipped"] {
            let mut draft = alice_draft();
            draft.status = Some(status.to_string());
            assert_eq!(draft.validate_new().unwrap().status, DeliveryStatus::Pending);
        }
    }

    #[test]
    fn draft_decodes_string_and_number_quantities() {
        let draft: DeliveryDraft = serde_json::from_str(r#"{"quantity": "4"}"#).unwrap();
        assert_eq!(draft.quantity, Some(QuantityField::Text("4".to_string())));
        let draft: DeliveryDraft = serde_json::from_str(r#"{"quantity": 4}"#).unwrap();
        assert_eq!(draft.quantity, Some(QuantityField::Number(4)));
    }
}
