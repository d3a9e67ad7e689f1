//! `SeaORM` implementation of the `DeliveryService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::DeliveryId;
use crate::models::delivery::Delivery;
use crate::services::delivery_service::{
    DeliveryDraft, DeliveryError, DeliveryService, parse_status,
};

pub struct SeaOrmDeliveryService {
    store: Store,
}

impl SeaOrmDeliveryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DeliveryService for SeaOrmDeliveryService {
    async fn create(&self, draft: DeliveryDraft) -> Result<DeliveryId, DeliveryError> {
        let input = draft.validate_new()?;
        Ok(self.store.insert_delivery(&input).await?)
    }

    async fn list(&self) -> Result<Vec<Delivery>, DeliveryError> {
        Ok(self.store.list_deliveries().await?)
    }

    async fn update_full(
        &self,
        id: DeliveryId,
        draft: DeliveryDraft,
    ) -> Result<(), DeliveryError> {
        let expected_revision = draft.revision;
        let input = draft.validate()?;

        let rows = self
            .store
            .replace_delivery(id, &input, expected_revision)
            .await?;

        if rows == 0
            && let Some(expected) = expected_revision
            && let Some(current) = self.store.get_delivery(id).await?
        {
            return Err(DeliveryError::StaleRevision {
                id,
                expected,
                current: current.revision,
            });
        }

        if rows > 0 {
            info!("Updated delivery {id} (status {})", input.status);
        }
        Ok(())
    }

    async fn update_status(
        &self,
        id: DeliveryId,
        status: Option<String>,
    ) -> Result<(), DeliveryError> {
        let status = parse_status(status)?
            .ok_or_else(|| DeliveryError::Validation("Status is required".to_string()))?;

        if self.store.set_delivery_status(id, status).await? > 0 {
            info!("Delivery {id} is now {status}");
        }
        Ok(())
    }

    async fn delete(&self, id: DeliveryId) -> Result<(), DeliveryError> {
        if self.store.delete_delivery(id).await? > 0 {
            info!("Deleted delivery {id}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeliveryStatus;
    use crate::services::delivery_service::QuantityField;

    fn draft(name: &str) -> DeliveryDraft {
        DeliveryDraft {
            customer_name: Some(name.to_string()),
            customer_email: Some("a@x.com".to_string()),
            customer_phone: Some("555".to_string()),
            delivery_address: Some("1 Main St".to_string()),
            product_name: Some("Widget".to_string()),
            quantity: Some(QuantityField::Number(3)),
            delivery_date: Some("2025-01-10".to_string()),
            ..Default::default()
        }
    }

    async fn service() -> SeaOrmDeliveryService {
        SeaOrmDeliveryService::new(Store::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn create_defaults_to_pending_and_lists_newest_first() {
        let service = service().await;

        let first = service.create(draft("Alice")).await.unwrap();
        let second = service.create(draft("Bob")).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second);
        assert_eq!(listed[1].id, first);
        assert_eq!(listed[1].status, DeliveryStatus::Pending);
        assert_eq!(listed[1].revision, 1);
    }

    #[tokio::test]
    async fn invalid_create_writes_nothing() {
        let service = service().await;

        let mut incomplete = draft("Alice");
        incomplete.product_name = None;
        assert!(matches!(
            service.create(incomplete).await,
            Err(DeliveryError::Validation(_))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_full_replaces_fields_and_bumps_revision() {
        let service = service().await;
        let id = service.create(draft("Alice")).await.unwrap();

        let mut replacement = draft("Alicia");
        replacement.quantity = Some(QuantityField::Number(5));
        replacement.status = Some("processing".to_string());
        service.update_full(id, replacement).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].customer_name, "Alicia");
        assert_eq!(listed[0].quantity, 5);
        assert_eq!(listed[0].status, DeliveryStatus::Processing);
        assert_eq!(listed[0].revision, 2);
    }

    #[tokio::test]
    async fn update_without_status_resets_to_pending() {
        let service = service().await;
        let id = service.create(draft("Alice")).await.unwrap();
        service
            .update_status(id, Some("delivered".to_string()))
            .await
            .unwrap();

        service.update_full(id, draft("Alice")).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].status, DeliveryStatus::Pending);
    }

    #[tokio::test]
    async fn stale_revision_is_rejected_and_row_unchanged() {
        let service = service().await;
        let id = service.create(draft("Alice")).await.unwrap();

        let mut current = draft("First editor");
        current.revision = Some(1);
        service.update_full(id, current).await.unwrap();

        let mut stale = draft("Second editor");
        stale.revision = Some(1);
        let err = service.update_full(id, stale).await.unwrap_err();
        assert!(matches!(
            err,
            DeliveryError::StaleRevision {
                expected: 1,
                current: 2,
                ..
            }
        ));

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].customer_name, "First editor");
    }

    #[tokio::test]
    async fn missing_ids_are_silent_no_ops() {
        let service = service().await;
        let ghost = DeliveryId::new(404);

        service.update_full(ghost, draft("Nobody")).await.unwrap();

        let mut with_revision = draft("Nobody");
        with_revision.revision = Some(3);
        service.update_full(ghost, with_revision).await.unwrap();

        service
            .update_status(ghost, Some("delivered".to_string()))
            .await
            .unwrap();
        service.delete(ghost).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_status_requires_known_value() {
        let service = service().await;
        let id = service.create(draft("Alice")).await.unwrap();

        assert!(matches!(
            service.update_status(id, None).await,
            Err(DeliveryError::Validation(_))
        ));
        assert!(matches!(
            service.update_status(id, Some("returned".to_string())).await,
            Err(DeliveryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn delete_twice_succeeds() {
        let service = service().await;
        let id = service.create(draft("Alice")).await.unwrap();

        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
