//! Key/value page cache used to avoid refetching category pages.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// A key/value store for raw page bodies with per-entry expiry.
///
/// Implementations must treat an expired entry exactly like a missing one.
/// There is no invalidation API.
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Returns the cached body for `key` if present and still fresh.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `body` under `key`, replacing any previous entry, fresh for `ttl`.
    async fn put(&self, key: &str, body: String, ttl: Duration);
}

#[derive(Debug)]
struct CachedPage {
    body: String,
    /// `None` when `ttl` was too large to represent; the entry never expires.
    expires_at: Option<Instant>,
}

impl CachedPage {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Process-local [`PageCache`] backed by a mutex-guarded map.
///
/// Expired entries are evicted when their key is read and swept from the
/// whole map on every `put`, so the map holds at most the pages fetched
/// within one TTL window.
#[derive(Debug, Default)]
pub struct InMemoryPageCache {
    entries: Mutex<HashMap<String, CachedPage>>,
}

impl InMemoryPageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl PageCache for InMemoryPageCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        match entries.get(key) {
            Some(page) if page.is_fresh(now) => Some(page.body.clone()),
            Some(_) => {
                entries.remove(key);
                tracing::debug!(key, "page cache entry expired");
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: &str, body: String, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let before = entries.len();
        entries.retain(|_, page| page.is_fresh(now));
        let swept = before - entries.len();
        if swept > 0 {
            tracing::debug!(swept, "swept expired page cache entries");
        }

        let expires_at = now.checked_add(ttl);
        entries.insert(key.to_owned(), CachedPage { body, expires_at });
    }
}
