use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use grocer_core::DealProduct;
use grocer_scraper::{ScraperError, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{pretty_json, AppState, ErrorBody};

#[derive(Debug, Default, Deserialize)]
pub(super) struct DealsQuery {
    pub store: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
    pub subcategory: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DealsResponse<'a> {
    store: &'a str,
    category: &'a str,
    subcategory: Option<&'a str>,
    count: usize,
    products: Vec<DealProduct>,
    category_info: Option<serde_json::Value>,
}

/// Every way a deals request can fail, mapped to a status and message.
#[derive(Debug)]
pub(super) enum DealsError {
    MissingParams,
    Scraper(ScraperError),
}

impl From<ScraperError> for DealsError {
    fn from(e: ScraperError) -> Self {
        Self::Scraper(e)
    }
}

impl IntoResponse for DealsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingParams => (
                StatusCode::BAD_REQUEST,
                "Missing required parameters: store and category".to_owned(),
            ),
            Self::Scraper(ScraperError::UnexpectedStatus { status, .. }) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                format!("Failed to fetch ShopRite page: {status}"),
            ),
            Self::Scraper(ScraperError::MissingPreloadedState { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not extract product data from page".to_owned(),
            ),
            Self::Scraper(e) => {
                tracing::error!(error = %e, "deals request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        pretty_json(status, &ErrorBody { error: message })
    }
}

/// Reads a leading integer the way a lenient query parser does: optional
/// surrounding whitespace, optional sign, then digits up to the first
/// non-digit. Anything unreadable, and negative values, fall back to the
/// default limit; `0` is honoured.
pub(super) fn parse_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw.map(str::trim_start).filter(|s| !s.is_empty()) else {
        return DEFAULT_LIMIT;
    };
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<usize>() {
        Ok(0) => 0,
        Ok(_) if negative => DEFAULT_LIMIT,
        Ok(n) => n,
        Err(_) => DEFAULT_LIMIT,
    }
}

pub(super) async fn get_deals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DealsQuery>,
) -> Result<Response, DealsError> {
    let store = query.store.as_deref().filter(|s| !s.is_empty());
    let category = query.category.as_deref().filter(|s| !s.is_empty());
    let (Some(store), Some(category)) = (store, category) else {
        tracing::debug!(request_id = %req_id.0, "deals request missing store or category");
        return Err(DealsError::MissingParams);
    };

    let subcategory = query.subcategory.as_deref().filter(|s| !s.is_empty());
    let limit = parse_limit(query.limit.as_deref());

    tracing::info!(
        request_id = %req_id.0,
        store,
        category,
        subcategory,
        limit,
        "fetching category deals"
    );

    let deals = state
        .deals
        .extract_deals(store, category, subcategory, limit)
        .await?;

    let body = DealsResponse {
        store,
        category,
        subcategory,
        count: deals.products.len(),
        products: deals.products,
        category_info: deals.category_info,
    };

    let mut response = pretty_json(StatusCode::OK, &body);
    let cache_control = format!("public, max-age={}", state.response_max_age_secs);
    if let Ok(value) = HeaderValue::from_str(&cache_control) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    Ok(response)
}

/// Answers any `OPTIONS` request on the endpoint with an empty 200.
/// Genuine CORS preflights are handled by the CORS layer before this point.
pub(super) async fn preflight() -> StatusCode {
    StatusCode::OK
}
