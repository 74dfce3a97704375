use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use grocer_scraper::{DealsExtractor, InMemoryPageCache, ShopRiteClient};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::deals::parse_limit;
use super::*;

const CATEGORY_PATH: &str = "/sm/planning/rsid/641/categories/meat-id-520692";

fn page_html() -> String {
    let state = json!({
        "departments": {
            "subCategory": {
                "name": "Meat",
                "subCategories": {
                    "Beef": { "products": ["1", "2"] },
                    "Pork": { "products": ["2", "3"] }
                }
            }
        },
        "productCardDictionary": {
            "1": { "sku": "1", "name": "Ground Beef", "price": "$4.99", "image": { "cell": "https://img/1.jpg" } },
            "2": { "sku": "2", "name": "Mixed Grill", "price": "$7.99", "isDiscounted": true },
            "3": { "sku": "3", "name": "Pork Chops", "price": "$3.49" }
        }
    });
    format!("<html><script>window.__PRELOADED_STATE__ = {state};</script></html>")
}

fn app_for(server: &MockServer) -> Router {
    app_with_upstream(&server.uri())
}

fn app_with_upstream(base_url: &str) -> Router {
    let client =
        ShopRiteClient::with_base_url(base_url, 5, "grocer-test/0.1").expect("test client");
    let deals = DealsExtractor::new(
        client,
        Arc::new(InMemoryPageCache::new()),
        Duration::from_secs(86_400),
    );
    build_app(AppState {
        deals: Arc::new(deals),
        response_max_age_secs: 3600,
    })
}

async fn mount_page(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("response")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[test]
fn parse_limit_reads_leading_integer() {
    assert_eq!(parse_limit(None), 20);
    assert_eq!(parse_limit(Some("")), 20);
    assert_eq!(parse_limit(Some("10")), 10);
    assert_eq!(parse_limit(Some(" 7")), 7);
    assert_eq!(parse_limit(Some("5abc")), 5);
    assert_eq!(parse_limit(Some("+3")), 3);
    assert_eq!(parse_limit(Some("0")), 0);
    assert_eq!(parse_limit(Some("abc")), 20);
    assert_eq!(parse_limit(Some("-4")), 20);
}

#[tokio::test]
async fn health_reports_ok() {
    let server = MockServer::start().await;
    let response = send(app_for(&server), get_request("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn missing_params_is_bad_request() {
    let server = MockServer::start().await;

    for uri in [
        "/shoprite-deals",
        "/shoprite-deals?store=641",
        "/shoprite-deals?category=meat-id-520692",
        "/shoprite-deals?store=&category=meat-id-520692",
    ] {
        let response = send(app_for(&server), get_request(uri)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing required parameters: store and category" })
        );
    }
}

#[tokio::test]
async fn bad_request_still_carries_cors_header() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/shoprite-deals?store=641")
        .header(header::ORIGIN, "https://dashboard.example.com")
        .body(Body::empty())
        .expect("request");

    let response = send(app_for(&server), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.as_bytes()),
        Some(&b"*"[..])
    );
}

#[tokio::test]
async fn returns_products_with_cache_headers() {
    let server = MockServer::start().await;
    mount_page(&server, ResponseTemplate::new(200).set_body_string(page_html())).await;

    let response = send(
        app_for(&server),
        get_request("/shoprite-deals?store=641&category=meat-id-520692&limit=2"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
        Some(&b"public, max-age=3600"[..])
    );
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"application/json"[..])
    );
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["store"], "641");
    assert_eq!(json["category"], "meat-id-520692");
    assert_eq!(json["subcategory"], Value::Null);
    assert_eq!(json["count"], 2);
    assert_eq!(json["products"][0]["name"], "Ground Beef");
    assert_eq!(json["products"][0]["image"], "https://img/1.jpg");
    assert_eq!(json["products"][1]["isDiscounted"], true);
    assert_eq!(json["products"][1]["wasPrice"], Value::Null);
    assert_eq!(json["categoryInfo"]["name"], "Meat");
}

#[tokio::test]
async fn subcategory_filters_products() {
    let server = MockServer::start().await;
    mount_page(&server, ResponseTemplate::new(200).set_body_string(page_html())).await;

    let response = send(
        app_for(&server),
        get_request("/shoprite-deals?store=641&category=meat-id-520692&subcategory=Pork"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["subcategory"], "Pork");
    assert_eq!(json["count"], 2);
    let skus: Vec<_> = json["products"]
        .as_array()
        .expect("products array")
        .iter()
        .map(|p| p["sku"].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(skus, vec!["2", "3"]);
}

#[tokio::test]
async fn upstream_status_is_passed_through() {
    let server = MockServer::start().await;
    mount_page(&server, ResponseTemplate::new(404)).await;

    let response = send(
        app_for(&server),
        get_request("/shoprite-deals?store=641&category=meat-id-520692"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to fetch ShopRite page: 404" })
    );
}

#[tokio::test]
async fn page_without_state_is_server_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        ResponseTemplate::new(200).set_body_string("<html><body>maintenance</body></html>"),
    )
    .await;

    let response = send(
        app_for(&server),
        get_request("/shoprite-deals?store=641&category=meat-id-520692"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Could not extract product data from page" })
    );
}

#[tokio::test]
async fn unreachable_upstream_is_server_error() {
    // Nothing listens on port 1, so the connection is refused.
    let response = send(
        app_with_upstream("http://127.0.0.1:1"),
        get_request("/shoprite-deals?store=641&category=meat-id-520692"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    let message = json["error"].as_str().expect("error string");
    assert!(!message.is_empty());
}

#[tokio::test]
async fn plain_options_is_empty_ok() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/shoprite-deals")
        .body(Body::empty())
        .expect("request");

    let response = send(app_for(&server), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    assert!(body.is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/shoprite-deals")
        .header(header::ORIGIN, "https://dashboard.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .expect("request");

    let response = send(app_for(&server), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.as_bytes()),
        Some(&b"*"[..])
    );
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn request_id_is_echoed() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .expect("request");

    let response = send(app_for(&server), request).await;

    assert_eq!(
        response.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"req-123"[..])
    );
}
