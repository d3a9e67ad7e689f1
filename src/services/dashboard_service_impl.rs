//! `SeaORM` implementation of the `DashboardService` trait.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::db::Store;
use crate::domain::DeliveryStatus;
use crate::services::dashboard_service::{DashboardError, DashboardService, DashboardStats};

pub struct SeaOrmDashboardService {
    store: Store,
}

impl SeaOrmDashboardService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Counters with `today` pinned to the given date.
    pub async fn stats_on(&self, today: NaiveDate) -> Result<DashboardStats, DashboardError> {
        let (total_deliveries, pending, processing, delivered, today) = tokio::try_join!(
            self.store.count_deliveries(),
            self.store
                .count_deliveries_with_status(DeliveryStatus::Pending),
            self.store
                .count_deliveries_with_status(DeliveryStatus::Processing),
            self.store
                .count_deliveries_with_status(DeliveryStatus::Delivered),
            self.store.count_deliveries_due_on(today),
        )?;

        Ok(DashboardStats {
            total_deliveries,
            pending,
            processing,
            delivered,
            today,
        })
    }
}

#[async_trait]
impl DashboardService for SeaOrmDashboardService {
    async fn get_stats(&self) -> Result<DashboardStats, DashboardError> {
        self.stats_on(Local::now().date_naive()).await
    }
}
