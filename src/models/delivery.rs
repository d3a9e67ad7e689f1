use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DeliveryId, DeliveryStatus};

/// Validated field set used to insert or fully replace a delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryInput {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub product_name: String,
    pub quantity: i32,
    pub delivery_date: NaiveDate,
    pub special_instructions: Option<String>,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub product_name: String,
    pub quantity: i32,
    pub delivery_date: NaiveDate,
    pub special_instructions: Option<String>,
    pub status: DeliveryStatus,
    pub revision: i32,
    pub created_at: String,
}
