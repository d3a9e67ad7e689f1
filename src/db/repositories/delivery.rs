use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use crate::domain::{DeliveryId, DeliveryStatus};
use crate::entities::{deliveries, prelude::*};
use crate::models::delivery::{Delivery, DeliveryInput};

/// Repository for delivery order operations
pub struct DeliveryRepository {
    conn: DatabaseConnection,
}

impl DeliveryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_model(m: deliveries::Model) -> Delivery {
        Delivery {
            id: DeliveryId::new(m.id),
            customer_name: m.customer_name,
            customer_email: m.customer_email,
            customer_phone: m.customer_phone,
            delivery_address: m.delivery_address,
            product_name: m.product_name,
            quantity: m.quantity,
            delivery_date: m.delivery_date,
            special_instructions: m.special_instructions,
            status: m.status,
            revision: m.revision,
            created_at: m.created_at,
        }
    }

    /// Active model with every caller-mutable column set and the rest untouched.
    fn mutable_fields(input: &DeliveryInput) -> deliveries::ActiveModel {
        deliveries::ActiveModel {
            customer_name: Set(input.customer_name.clone()),
            customer_email: Set(input.customer_email.clone()),
            customer_phone: Set(input.customer_phone.clone()),
            delivery_address: Set(input.delivery_address.clone()),
            product_name: Set(input.product_name.clone()),
            quantity: Set(input.quantity),
            delivery_date: Set(input.delivery_date),
            special_instructions: Set(input.special_instructions.clone()),
            status: Set(input.status),
            ..Default::default()
        }
    }

    // ========================================================================
    // Writes
    // ========================================================================

    pub async fn insert(&self, input: &DeliveryInput) -> Result<DeliveryId> {
        let mut active_model = Self::mutable_fields(input);
        active_model.revision = Set(1);
        active_model.created_at = Set(crate::db::timestamp_now());

        let res = Deliveries::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to insert delivery")?;

        info!(
            "Created delivery {} for {} ({} x {})",
            res.last_insert_id, input.customer_name, input.quantity, input.product_name
        );
        Ok(DeliveryId::new(res.last_insert_id))
    }

    /// Replaces all mutable columns. With `expected_revision` the row only
    /// changes if its stored revision still matches. Returns rows affected.
    pub async fn replace(
        &self,
        id: DeliveryId,
        input: &DeliveryInput,
        expected_revision: Option<i32>,
    ) -> Result<u64> {
        let mut update = Deliveries::update_many()
            .set(Self::mutable_fields(input))
            .col_expr(
                deliveries::Column::Revision,
                Expr::col(deliveries::Column::Revision).add(1),
            )
            .filter(deliveries::Column::Id.eq(id.value()));

        if let Some(revision) = expected_revision {
            update = update.filter(deliveries::Column::Revision.eq(revision));
        }

        let result = update
            .exec(&self.conn)
            .await
            .context("Failed to update delivery")?;

        debug!("Replaced delivery {}: {} row(s)", id, result.rows_affected);
        Ok(result.rows_affected)
    }

    pub async fn set_status(&self, id: DeliveryId, status: DeliveryStatus) -> Result<u64> {
        let result = Deliveries::update_many()
            .col_expr(deliveries::Column::Status, Expr::value(status.as_str()))
            .col_expr(
                deliveries::Column::Revision,
                Expr::col(deliveries::Column::Revision).add(1),
            )
            .filter(deliveries::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to update delivery status")?;

        debug!("Set delivery {} to {}: {} row(s)", id, status, result.rows_affected);
        Ok(result.rows_affected)
    }

    pub async fn remove(&self, id: DeliveryId) -> Result<u64> {
        let result = Deliveries::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete delivery")?;

        debug!("Deleted delivery {}: {} row(s)", id, result.rows_affected);
        Ok(result.rows_affected)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn get(&self, id: DeliveryId) -> Result<Option<Delivery>> {
        let row = Deliveries::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query delivery")?;

        Ok(row.map(Self::map_model))
    }

    /// Most recently created first; id breaks timestamp ties.
    pub async fn list_recent_first(&self) -> Result<Vec<Delivery>> {
        let rows = Deliveries::find()
            .order_by_desc(deliveries::Column::CreatedAt)
            .order_by_desc(deliveries::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list deliveries")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn count_all(&self) -> Result<u64> {
        Deliveries::find()
            .count(&self.conn)
            .await
            .context("Failed to count deliveries")
    }

    pub async fn count_with_status(&self, status: DeliveryStatus) -> Result<u64> {
        Deliveries::find()
            .filter(deliveries::Column::Status.eq(status))
            .count(&self.conn)
            .await
            .with_context(|| format!("Failed to count {status} deliveries"))
    }

    pub async fn count_due_on(&self, date: NaiveDate) -> Result<u64> {
        Deliveries::find()
            .filter(deliveries::Column::DeliveryDate.eq(date))
            .count(&self.conn)
            .await
            .with_context(|| format!("Failed to count deliveries due on {date}"))
    }
}
