//! Domain service for account registration and login.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::AccountId;
use crate::models::account::Account;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Same message for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Registration payload. Fields are optional so a missing field is a
/// validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Hashes the password and stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if a field is missing and
    /// [`AuthError::EmailTaken`] if the email is already registered.
    async fn register(&self, request: RegisterRequest) -> Result<AccountId, AuthError>;

    /// Verifies credentials and returns the account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, request: LoginRequest) -> Result<Account, AuthError>;

    /// Looks up the account a session points at.
    async fn current_account(&self, id: AccountId) -> Result<Account, AuthError>;
}
