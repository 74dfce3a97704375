//! HTTP client for the RedPepper digital-circular API.
//!
//! Every endpoint is a Drupal REST export selected with `?_format=json`.
//! Requests carry `Accept: application/json` and a configurable user agent.
//! Non-2xx responses surface as [`RedPepperError::UnexpectedStatus`]; nothing
//! is retried.

use std::time::Duration;

use grocer_core::{CatalogueMetadata, CircularPage};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::RedPepperError;
use crate::types::{CatalogueNode, GeoLocation, PageImage};

const DEFAULT_BASE_URL: &str = "https://app.redpepper.digital/";

/// Client for the RedPepper JSON endpoints.
///
/// Use [`RedPepperClient::new`] for production or
/// [`RedPepperClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct RedPepperClient {
    client: Client,
    base_url: Url,
    client_id: String,
}

impl RedPepperClient {
    /// Creates a client pointed at the production RedPepper API.
    ///
    /// # Errors
    ///
    /// Returns [`RedPepperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        client_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, RedPepperError> {
        Self::with_base_url(DEFAULT_BASE_URL, client_id, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`RedPepperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`RedPepperError::InvalidBaseUrl`] if
    /// `base_url` cannot be parsed or cannot carry a path.
    pub fn with_base_url(
        base_url: &str,
        client_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, RedPepperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| RedPepperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RedPepperError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            client_id: client_id.to_owned(),
        })
    }

    /// Fetches the full store listing for the configured client. Each store
    /// appears once per catalogue it carries.
    ///
    /// # Errors
    ///
    /// - [`RedPepperError::Http`] on network failure.
    /// - [`RedPepperError::UnexpectedStatus`] on a non-2xx response.
    /// - [`RedPepperError::Deserialize`] if the body is not a list of rows.
    pub async fn get_store_locations(&self) -> Result<Vec<GeoLocation>, RedPepperError> {
        let url = self.endpoint(&["client", &self.client_id, "catalogue", "geo_location", "json"]);
        let rows: Vec<GeoLocation> = self.request_json(&url, "geo_location listing").await?;
        tracing::debug!(rows = rows.len(), "fetched store listing");
        Ok(rows)
    }

    /// Fetches title, client, validity dates and page count for a catalogue.
    ///
    /// # Errors
    ///
    /// Same as [`RedPepperClient::get_store_locations`].
    pub async fn get_catalogue_metadata(
        &self,
        catalogue_id: &str,
    ) -> Result<CatalogueMetadata, RedPepperError> {
        let url = self.endpoint(&["node", catalogue_id]);
        let node: CatalogueNode = self
            .request_json(&url, &format!("node(id={catalogue_id})"))
            .await?;
        Ok(node.into_metadata(catalogue_id))
    }

    /// Fetches a catalogue's page images, sorted ascending by page number.
    ///
    /// # Errors
    ///
    /// Same as [`RedPepperClient::get_store_locations`].
    pub async fn get_circular_pages(
        &self,
        catalogue_id: &str,
    ) -> Result<Vec<CircularPage>, RedPepperError> {
        let url = self.endpoint(&["catalogue", catalogue_id, "page-images", "json"]);
        let raw: Vec<PageImage> = self
            .request_json(&url, &format!("page-images(catalogue={catalogue_id})"))
            .await?;

        let mut pages: Vec<CircularPage> = raw.into_iter().map(CircularPage::from).collect();
        pages.sort_by_key(|p| p.page_number);
        Ok(pages)
    }

    /// Appends `segments` to the base URL path and selects the JSON format.
    /// Each segment is percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut().append_pair("_format", "json");
        url
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, RedPepperError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "RedPepper request failed");
            return Err(RedPepperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RedPepperError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
