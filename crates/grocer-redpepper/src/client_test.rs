use super::*;

fn test_client(base_url: &str) -> RedPepperClient {
    RedPepperClient::with_base_url(base_url, "4573", 30, "grocer-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn geo_location_endpoint() {
    let client = test_client("https://app.redpepper.digital");
    let url = client.endpoint(&["client", "4573", "catalogue", "geo_location", "json"]);
    assert_eq!(
        url.as_str(),
        "https://app.redpepper.digital/client/4573/catalogue/geo_location/json?_format=json"
    );
}

#[test]
fn endpoint_ignores_trailing_slash() {
    let client = test_client("https://app.redpepper.digital/");
    let url = client.endpoint(&["node", "222"]);
    assert_eq!(url.as_str(), "https://app.redpepper.digital/node/222?_format=json");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("http://localhost:9000/proxy/");
    let url = client.endpoint(&["catalogue", "222", "page-images", "json"]);
    assert_eq!(
        url.as_str(),
        "http://localhost:9000/proxy/catalogue/222/page-images/json?_format=json"
    );
}

#[test]
fn endpoint_encodes_separators_in_ids() {
    let client = test_client("https://app.redpepper.digital");
    let url = client.endpoint(&["node", "1/../2"]);
    assert_eq!(
        url.as_str(),
        "https://app.redpepper.digital/node/1%2F..%2F2?_format=json"
    );
}

#[test]
fn rejects_unparseable_base_url() {
    let result = RedPepperClient::with_base_url("not a url", "4573", 30, "ua");
    assert!(matches!(result, Err(RedPepperError::InvalidBaseUrl { .. })));
}

#[test]
fn rejects_base_url_without_path() {
    let result = RedPepperClient::with_base_url("mailto:someone@example.com", "4573", 30, "ua");
    assert!(matches!(result, Err(RedPepperError::InvalidBaseUrl { .. })));
}
