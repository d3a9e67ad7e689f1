use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
};
use tracing::info;

use crate::domain::AccountId;
use crate::entities::{accounts, prelude::*};
use crate::models::account::Account;

/// Outcome of an account insert. A duplicate email is an expected result,
/// not a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountInsert {
    Created(AccountId),
    EmailTaken,
}

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: AccountId::new(model.id),
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AccountInsert> {
        let active_model = accounts::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(crate::db::timestamp_now()),
            ..Default::default()
        };

        match Accounts::insert(active_model).exec(&self.conn).await {
            Ok(res) => {
                info!("Registered account {} ({})", res.last_insert_id, email);
                Ok(AccountInsert::Created(AccountId::new(res.last_insert_id)))
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(AccountInsert::EmailTaken)
            }
            Err(err) => Err(err).context("Failed to insert account"),
        }
    }

    /// Get account by email together with its password hash (login only)
    pub async fn get_by_email_with_password(
        &self,
        email: &str,
    ) -> Result<Option<(Account, String)>> {
        let account = Accounts::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query account by email")?;

        Ok(account.map(|a| {
            let password_hash = a.password_hash.clone();
            (Account::from(a), password_hash)
        }))
    }

    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let account = Accounts::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query account by ID")?;

        Ok(account.map(Account::from))
    }

    pub async fn count_by_email(&self, email: &str) -> Result<u64> {
        Accounts::find()
            .filter(accounts::Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("Failed to count accounts by email")
    }
}
