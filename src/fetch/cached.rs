//! Counting, caching wrapper around a fetcher.

use super::Fetcher;
use crate::cache::to_int;
use crate::store::KvStore;
use crate::Result;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Configuration for [`CachedFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// How long a fetched payload stays served from cache.
    pub ttl: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10),
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Caches fetch results per input with a TTL, counting every request.
///
/// Each call increments `count:{input}` unconditionally, then serves
/// `cached:{input}` if the store still considers it live; only on a miss is
/// the underlying fetcher invoked and the payload written back with the
/// configured TTL. Expiry is the store's job, not ours.
pub struct CachedFetcher {
    store: Arc<dyn KvStore>,
    fetcher: Arc<dyn Fetcher>,
    config: FetchConfig,
}

impl CachedFetcher {
    pub fn new(store: Arc<dyn KvStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_config(store, fetcher, FetchConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn KvStore>,
        fetcher: Arc<dyn Fetcher>,
        config: FetchConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            config,
        }
    }

    fn count_key(input: &str) -> String {
        format!("count:{input}")
    }

    fn cache_key(input: &str) -> String {
        format!("cached:{input}")
    }

    /// Fetch `input`, serving a live cached payload when one exists.
    pub async fn get(&self, input: &str) -> Result<Bytes> {
        self.store.increment(&Self::count_key(input)).await?;

        if let Some(cached) = self.store.get(&Self::cache_key(input)).await? {
            debug!(input, "serving cached payload");
            return Ok(Bytes::from(cached));
        }

        debug!(input, "cache miss, fetching");
        let payload = self.fetcher.fetch(input).await?;
        self.store
            .set_with_expiry(&Self::cache_key(input), &payload, self.config.ttl)
            .await?;
        Ok(payload)
    }

    /// How many times `input` has been requested (hits and misses alike).
    pub async fn request_count(&self, input: &str) -> Result<i64> {
        match self.store.get(&Self::count_key(input)).await? {
            Some(raw) => to_int(&raw),
            None => Ok(0),
        }
    }
}
