use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiJson, ApiPath, ApiResponse, AppState};
use crate::domain::{DeliveryId, DeliveryStatus};
use crate::models::delivery::Delivery;
use crate::services::{DeliveryDraft, DeliveryError};

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::Validation(msg) => ApiError::ValidationError(msg),
            DeliveryError::StaleRevision { .. } => ApiError::StaleRevision(err.to_string()),
            DeliveryError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeliveryDto {
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

impl From<Delivery> for DeliveryDto {
    fn from(delivery: Delivery) -> Self {
        Self {
            id: delivery.id,
            customer_name: delivery.customer_name,
            customer_email: delivery.customer_email,
            customer_phone: delivery.customer_phone,
            delivery_address: delivery.delivery_address,
            product_name: delivery.product_name,
            quantity: delivery.quantity,
            delivery_date: delivery.delivery_date,
            special_instructions: delivery.special_instructions,
            status: delivery.status,
            revision: delivery.revision,
            created_at: delivery.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDelivery {
    pub delivery_id: DeliveryId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

/// GET /orders/getdeliveries
pub async fn list_deliveries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<DeliveryDto>>>, ApiError> {
    let deliveries = state.delivery_service().list().await?;
    let dtos = deliveries.into_iter().map(DeliveryDto::from).collect();

    Ok(Json(ApiResponse::success("Deliveries fetched", dtos)))
}

/// POST /orders/deliveries
pub async fn create_delivery(
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<DeliveryDraft>,
) -> Result<Json<ApiResponse<CreatedDelivery>>, ApiError> {
    let delivery_id = state.delivery_service().create(draft).await?;

    Ok(Json(ApiResponse::success(
        "Delivery order created successfully!",
        CreatedDelivery { delivery_id },
    )))
}

/// PUT /orders/updatedeliveries/{id}
pub async fn update_delivery(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<DeliveryId>,
    ApiJson(draft): ApiJson<DeliveryDraft>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.delivery_service().update_full(id, draft).await?;
    Ok(Json(ApiResponse::ok("Delivery updated successfully!")))
}

/// PUT /orders/updatestatus/{id}
pub async fn update_delivery_status(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<DeliveryId>,
    ApiJson(payload): ApiJson<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .delivery_service()
        .update_status(id, payload.status)
        .await?;
    Ok(Json(ApiResponse::ok("Delivery status updated successfully!")))
}

/// DELETE /orders/deletedeliveries/{id}
pub async fn delete_delivery(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<DeliveryId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.delivery_service().delete(id).await?;
    Ok(Json(ApiResponse::ok("Delivery deleted successfully!")))
}
