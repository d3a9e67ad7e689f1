//! Read-only statistics over delivery orders.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Aggregation failed: {0}")]
    Aggregation(String),
}

impl From<sea_orm::DbErr> for DashboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Aggregation(err.to_string())
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Aggregation(format!("{err:#}"))
    }
}

/// Dashboard counters.
///
/// # Examples
///
/// ```
/// use delivery_desk::services::dashboard_service::DashboardStats;
///
/// let stats = DashboardStats { total_deliveries: 4, pending: 2, processing: 1, delivered: 1, today: 0 };
/// let json = serde_json::to_value(stats).unwrap();
/// assert_eq!(json["totalDeliveries"], 4);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_deliveries: u64,
    pub pending: u64,
    pub processing: u64,
    pub delivered: u64,
    /// Orders whose delivery date is the server's current local date.
    pub today: u64,
}

#[async_trait::async_trait]
pub trait DashboardService: Send + Sync {
    /// Computes all counters; fails as a whole if any count fails.
    async fn get_stats(&self) -> Result<DashboardStats, DashboardError>;
}
