use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::{DashboardError, DashboardStats};

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Aggregation(msg) => ApiError::AggregationError(msg),
        }
    }
}

/// GET /dashboard/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.dashboard_service().get_stats().await?;
    Ok(Json(ApiResponse::success("Stats fetched", stats)))
}
