//! Request logging, HTTP metrics and response hardening.

use crate::api::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    ("cache-control", "no-store"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestOutcome {
    Success,
    ClientError,
    ServerError,
}

impl RequestOutcome {
    const fn from_status(status: u16) -> Self {
        match status {
            500.. => Self::ServerError,
            400.. => Self::ClientError,
            _ => Self::Success,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ClientError => "client_error",
            Self::ServerError => "error",
        }
    }
}

/// Which service a route template belongs to (`/api/orders/...` -> `orders`).
fn api_area(route: Option<&str>) -> &'static str {
    let Some(route) = route else {
        return "unmatched";
    };

    let route = route.trim_start_matches('/');
    let route = route.strip_prefix("api/").unwrap_or(route);

    match route.split('/').next() {
        Some("auth") => "auth",
        Some("orders") => "orders",
        Some("dashboard") => "dashboard",
        Some("health" | "metrics") => "system",
        _ => "other",
    }
}

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.prometheus_handle.as_ref() {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics are disabled").into_response(),
    }
}

/// One span per request; the finished line carries status, outcome and
/// duration. Metrics are labelled by route template, never the raw path.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let area = api_area(route.as_deref());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        path = %path,
        route = route.clone(),
        area = area,
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();
        let outcome = RequestOutcome::from_status(status);

        let labels = [
            ("method", method.to_string()),
            ("path", route.unwrap_or_else(|| "unmatched".to_string())),
            ("area", area.to_string()),
            ("status", status.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if outcome == RequestOutcome::ServerError {
            warn!(
                duration_ms,
                status_code = status,
                outcome = outcome.as_str(),
                "Request failed"
            );
        } else {
            info!(
                duration_ms,
                status_code = status,
                outcome = outcome.as_str(),
                "Request finished"
            );
        }

        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}
