use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiJson, ApiResponse, AppState};
use crate::domain::AccountId;
use crate::models::account::Account;
use crate::services::{AuthError, LoginRequest, RegisterRequest};

/// Session key holding the logged-in [`AccountId`].
pub const SESSION_ACCOUNT_KEY: &str = "account_id";

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::EmailTaken => ApiError::Conflict(err.to_string()),
            AuthError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            AuthError::Validation(msg) => ApiError::ValidationError(msg),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
            AuthError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisteredAccount {
    pub id: AccountId,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: AccountId,
    pub name: String,
    pub email: String,
}

impl From<Account> for UserDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserDto,
    pub session_expires_in_minutes: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisteredAccount>>, ApiError> {
    let id = state.auth_service().register(payload).await?;

    Ok(Json(ApiResponse::success(
        "User registered successfully",
        RegisteredAccount { id },
    )))
}

/// POST /auth/login
/// Verifies credentials and binds the account to a fresh session id.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let account = state.auth_service().login(payload).await?;

    session.cycle_id().await?;
    session.insert(SESSION_ACCOUNT_KEY, account.id).await?;
    tracing::Span::current().record("user_id", account.id.value());

    Ok(Json(ApiResponse::success(
        "Login successful",
        LoginResponse {
            user: account.into(),
            session_expires_in_minutes: state.config().server.session_inactivity_minutes,
        },
    )))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse<()>>, ApiError> {
    session.flush().await?;
    Ok(Json(ApiResponse::ok("Logged out")))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = session
        .get::<AccountId>(SESSION_ACCOUNT_KEY)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    tracing::Span::current().record("user_id", id.value());
    let account = state.auth_service().current_account(id).await?;

    Ok(Json(ApiResponse::success("Authenticated", account.into())))
}
