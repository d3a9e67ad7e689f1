pub mod password;
pub use password::PasswordHasher;

pub mod validation;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginRequest, RegisterRequest};
pub use auth_service_impl::SeaOrmAuthService;

pub mod delivery_service;
pub mod delivery_service_impl;
pub use delivery_service::{DeliveryDraft, DeliveryError, DeliveryService, QuantityField};
pub use delivery_service_impl::SeaOrmDeliveryService;

pub mod dashboard_service;
pub mod dashboard_service_impl;
pub use dashboard_service::{DashboardError, DashboardService, DashboardStats};
pub use dashboard_service_impl::SeaOrmDashboardService;
