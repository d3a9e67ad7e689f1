//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::{AccountInsert, Store};
use crate::domain::AccountId;
use crate::models::account::Account;
use crate::services::auth_service::{AuthError, AuthService, LoginRequest, RegisterRequest};
use crate::services::password::PasswordHasher;
use crate::services::validation::present;

pub struct SeaOrmAuthService {
    store: Store,
    hasher: PasswordHasher,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, request: RegisterRequest) -> Result<AccountId, AuthError> {
        let (Some(name), Some(email), Some(password)) = (
            present(request.name),
            present(request.email),
            present(request.password),
        ) else {
            return Err(AuthError::Validation("All fields are required".to_string()));
        };

        let password_hash = self.hasher.hash(&password).await?;

        match self
            .store
            .insert_account(&name, &email, &password_hash)
            .await?
        {
            AccountInsert::Created(id) => Ok(id),
            AccountInsert::EmailTaken => {
                info!("Registration rejected, email already in use: {email}");
                Err(AuthError::EmailTaken)
            }
        }
    }

    async fn login(&self, request: LoginRequest) -> Result<Account, AuthError> {
        let (Some(email), Some(password)) = (present(request.email), present(request.password))
        else {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        let Some((account, password_hash)) = self
            .store
            .get_account_by_email_with_password(&email)
            .await?
        else {
            warn!("Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(&password, &password_hash).await? {
            warn!(account_id = %account.id, "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        info!(account_id = %account.id, "Login successful");
        Ok(account)
    }

    async fn current_account(&self, id: AccountId) -> Result<Account, AuthError> {
        self.store
            .get_account(id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
