use anyhow::{Context, Result};
use chrono::{NaiveDate, SecondsFormat, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{AccountId, DeliveryId, DeliveryStatus};
use crate::models::account::Account;
use crate::models::delivery::{Delivery, DeliveryInput};

pub mod migrator;
pub mod repositories;

pub use repositories::account::AccountInsert;

/// RFC 3339 UTC timestamp with fixed microsecond width, so lexical order
/// matches chronological order.
pub(crate) fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Private in-memory database on a single connection.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        // Every in-memory connection is its own database, so the pool must
        // hold exactly one connection and never recycle it.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to database")?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn delivery_repo(&self) -> repositories::delivery::DeliveryRepository {
        repositories::delivery::DeliveryRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    pub async fn insert_account(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AccountInsert> {
        self.account_repo().insert(name, email, password_hash).await
    }

    pub async fn get_account_by_email_with_password(
        &self,
        email: &str,
    ) -> Result<Option<(Account, String)>> {
        self.account_repo().get_by_email_with_password(email).await
    }

    pub async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn count_accounts_with_email(&self, email: &str) -> Result<u64> {
        self.account_repo().count_by_email(email).await
    }

    // ========================================================================
    // Deliveries
    // ========================================================================

    pub async fn insert_delivery(&self, input: &DeliveryInput) -> Result<DeliveryId> {
        self.delivery_repo().insert(input).await
    }

    pub async fn get_delivery(&self, id: DeliveryId) -> Result<Option<Delivery>> {
        self.delivery_repo().get(id).await
    }

    pub async fn list_deliveries(&self) -> Result<Vec<Delivery>> {
        self.delivery_repo().list_recent_first().await
    }

    pub async fn replace_delivery(
        &self,
        id: DeliveryId,
        input: &DeliveryInput,
        expected_revision: Option<i32>,
    ) -> Result<u64> {
        self.delivery_repo()
            .replace(id, input, expected_revision)
            .await
    }

    pub async fn set_delivery_status(&self, id: DeliveryId, status: DeliveryStatus) -> Result<u64> {
        self.delivery_repo().set_status(id, status).await
    }

    pub async fn delete_delivery(&self, id: DeliveryId) -> Result<u64> {
        self.delivery_repo().remove(id).await
    }

    pub async fn count_deliveries(&self) -> Result<u64> {
        self.delivery_repo().count_all().await
    }

    pub async fn count_deliveries_with_status(&self, status: DeliveryStatus) -> Result<u64> {
        self.delivery_repo().count_with_status(status).await
    }

    pub async fn count_deliveries_due_on(&self, date: NaiveDate) -> Result<u64> {
        self.delivery_repo().count_due_on(date).await
    }
}
