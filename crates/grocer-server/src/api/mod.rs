mod deals;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use grocer_scraper::DealsExtractor;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub deals: Arc<DealsExtractor>,
    /// `max-age` advertised to callers on successful deal responses.
    pub response_max_age_secs: u64,
}

/// `{"error": "..."}` body shared by every failure response.
#[derive(Debug, Serialize)]
pub(super) struct ErrorBody {
    pub error: String,
}

/// Serializes `value` as pretty-printed JSON with an `application/json`
/// content type.
pub(super) fn pretty_json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/shoprite-deals",
            get(deals::get_deals).options(deals::preflight),
        )
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors()),
        )
        .with_state(state)
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

async fn health() -> Response {
    pretty_json(StatusCode::OK, &HealthData { status: "ok" })
}

#[cfg(test)]
mod tests;
