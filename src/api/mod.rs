use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::services::{AuthService, DashboardService, DeliveryService};
use crate::state::SharedState;

pub mod auth;
mod dashboard;
mod error;
mod extract;
mod observability;
pub mod orders;
mod system;
mod types;

pub use error::ApiError;
pub use extract::{ApiJson, ApiPath};
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn delivery_service(&self) -> &Arc<dyn DeliveryService> {
        &self.shared.delivery_service
    }

    #[must_use]
    pub fn dashboard_service(&self) -> &Arc<dyn DashboardService> {
        &self.shared.dashboard_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let cors_layer = cors_layer(&server.cors_allowed_origins);

    let api_router = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/orders/getdeliveries", get(orders::list_deliveries))
        .route("/orders/deliveries", post(orders::create_delivery))
        .route(
            "/orders/updatedeliveries/{id}",
            put(orders::update_delivery),
        )
        .route(
            "/orders/updatestatus/{id}",
            put(orders::update_delivery_status),
        )
        .route(
            "/orders/deletedeliveries/{id}",
            delete(orders::delete_delivery),
        )
        .route("/dashboard/stats", get(dashboard::get_stats))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(session_layer)
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_router)
        .fallback(not_found)
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

/// `*` allows any origin without credentials; an explicit list also lets
/// browsers send the session cookie cross-origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed for this route".to_string())
}
