//! HTTP client for ShopRite storefront category pages.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;

const DEFAULT_BASE_URL: &str = "https://www.shoprite.com";

/// HTTP client for ShopRite's server-rendered category pages.
///
/// Non-2xx responses surface as [`ScraperError::UnexpectedStatus`] carrying
/// the upstream status so callers can pass it through. Nothing is retried.
pub struct ShopRiteClient {
    client: Client,
    base_url: Url,
}

impl ShopRiteClient {
    /// Creates a client pointed at the production storefront.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds the category page URL for a store:
    /// `{base}/sm/planning/rsid/{store}/categories/{category}`.
    ///
    /// `store` and `category` are appended as single path segments, so any
    /// `/`, `?` or `#` they contain is percent-encoded.
    #[must_use]
    pub fn category_url(&self, store: &str, category: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["sm", "planning", "rsid", store, "categories", category]);
        }
        url
    }

    /// Fetches a page and returns its body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure, or if the body
    ///   cannot be read.
    pub async fn fetch_page(&self, url: &Url) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "category page fetch failed");
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
