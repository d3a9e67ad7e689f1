use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, DashboardService, DeliveryService, PasswordHasher, SeaOrmAuthService,
    SeaOrmDashboardService, SeaOrmDeliveryService,
};

/// Everything a request handler may touch. The pool inside [`Store`] is the
/// only shared resource; the services hold no mutable state of their own.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub delivery_service: Arc<dyn DeliveryService>,

    pub dashboard_service: Arc<dyn DashboardService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(&config.security)?;

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), hasher))
            as Arc<dyn AuthService>;

        let delivery_service = Arc::new(SeaOrmDeliveryService::new(store.clone()))
            as Arc<dyn DeliveryService>;

        let dashboard_service = Arc::new(SeaOrmDashboardService::new(store.clone()))
            as Arc<dyn DashboardService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_service,
            delivery_service,
            dashboard_service,
        })
    }
}
