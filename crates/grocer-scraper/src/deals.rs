//! Read-through loading of category pages and extraction of deal listings.

use std::sync::Arc;
use std::time::Duration;

use grocer_core::DealProduct;

use crate::cache::PageCache;
use crate::client::ShopRiteClient;
use crate::error::ScraperError;
use crate::extract::extract_preloaded_state;
use crate::products::{category_info, parse_products};

/// Products extracted from one category page.
#[derive(Debug, Clone)]
pub struct CategoryDeals {
    pub products: Vec<DealProduct>,
    /// `departments.subCategory` from the page, verbatim.
    pub category_info: Option<serde_json::Value>,
}

/// Fetches category pages through a [`PageCache`] and turns them into
/// [`CategoryDeals`].
///
/// The cache is keyed by the upstream page URL. Concurrent misses for the
/// same page each fetch upstream; the last write wins.
pub struct DealsExtractor {
    client: ShopRiteClient,
    cache: Arc<dyn PageCache>,
    page_ttl: Duration,
}

impl DealsExtractor {
    #[must_use]
    pub fn new(client: ShopRiteClient, cache: Arc<dyn PageCache>, page_ttl: Duration) -> Self {
        Self {
            client,
            cache,
            page_ttl,
        }
    }

    /// Returns the raw HTML of a store's category page, from the cache when
    /// fresh, otherwise from upstream (and then cached for `page_ttl`).
    ///
    /// Failed fetches are not cached.
    ///
    /// # Errors
    ///
    /// Propagates [`ShopRiteClient::fetch_page`] errors on a cache miss.
    pub async fn load_category_page(
        &self,
        store: &str,
        category: &str,
    ) -> Result<String, ScraperError> {
        let url = self.client.category_url(store, category);

        if let Some(html) = self.cache.get(url.as_str()).await {
            tracing::debug!(url = %url, "page cache hit");
            return Ok(html);
        }

        tracing::debug!(url = %url, "page cache miss; fetching upstream");
        let html = self.client.fetch_page(&url).await?;
        self.cache
            .put(url.as_str(), html.clone(), self.page_ttl)
            .await;
        Ok(html)
    }

    /// Loads a category page and extracts up to `limit` products, optionally
    /// restricted to one subcategory.
    ///
    /// # Errors
    ///
    /// - Any error from [`DealsExtractor::load_category_page`].
    /// - [`ScraperError::MissingPreloadedState`] if the page carries no
    ///   parseable preloaded state.
    pub async fn extract_deals(
        &self,
        store: &str,
        category: &str,
        subcategory: Option<&str>,
        limit: usize,
    ) -> Result<CategoryDeals, ScraperError> {
        let html = self.load_category_page(store, category).await?;

        let Some(state) = extract_preloaded_state(&html) else {
            let url = self.client.category_url(store, category).to_string();
            tracing::warn!(url, "category page has no usable preloaded state");
            return Err(ScraperError::MissingPreloadedState { url });
        };

        let products = parse_products(&state, subcategory, limit);
        let category_info = category_info(&state).cloned();

        tracing::info!(
            store,
            category,
            subcategory,
            count = products.len(),
            "extracted category deals"
        );

        Ok(CategoryDeals {
            products,
            category_info,
        })
    }
}
