//! The cache facade.

use super::value::{self, Value};
use crate::instrument::{CallCounter, CallHistory, Replay};
use crate::store::KvStore;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Configuration for [`Cache`] instrumentation.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Operation name under which store calls are counted and logged.
    pub operation_name: String,
    /// Count every `store` invocation.
    pub count_calls: bool,
    /// Record every `store` invocation's input and output for replay.
    pub record_history: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            operation_name: "cache.store".to_string(),
            count_calls: true,
            record_history: true,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = name.into();
        self
    }

    pub fn with_count_calls(mut self, enabled: bool) -> Self {
        self.count_calls = enabled;
        self
    }

    pub fn with_record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }
}

/// Instrumented store/retrieve facade over an injected [`KvStore`].
///
/// Records are written under freshly generated UUID keys and are immutable
/// once stored; the only removals are TTL expiry (for cached fetches, see
/// [`crate::fetch`]) and an explicit [`Cache::reset`]. Instrumentation
/// wrappers are composed at construction from [`CacheConfig`]: the call
/// counter runs outermost, so attempts are counted even when the underlying
/// write fails.
pub struct Cache {
    store: Arc<dyn KvStore>,
    config: CacheConfig,
    counter: CallCounter,
    history: CallHistory,
}

impl Cache {
    /// Build a facade with default instrumentation (counting and history on).
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_config(store, CacheConfig::default())
    }

    pub fn with_config(store: Arc<dyn KvStore>, config: CacheConfig) -> Self {
        let counter = CallCounter::new(Arc::clone(&store), config.operation_name.clone());
        let history = CallHistory::new(Arc::clone(&store), config.operation_name.clone());
        Self {
            store,
            config,
            counter,
            history,
        }
    }

    /// Store a value under a fresh collision-resistant key and return the key.
    pub async fn store(&self, value: impl Into<Value>) -> Result<String> {
        let value = value.into();
        if self.config.count_calls {
            self.counter.invoke(|| self.store_recorded(value)).await
        } else {
            self.store_recorded(value).await
        }
    }

    async fn store_recorded(&self, value: Value) -> Result<String> {
        if self.config.record_history {
            let input = value.clone();
            self.history
                .invoke(&input, move || self.write_record(value))
                .await
        } else {
            self.write_record(value).await
        }
    }

    async fn write_record(&self, value: Value) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &value.into_bytes()).await?;
        debug!(key = %key, "stored record");
        Ok(key)
    }

    /// Read the raw bytes under `key`. A key that was never written (or was
    /// flushed) is `Ok(None)`, never an error.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let raw = self.store.get(key).await?;
        debug!(key, hit = raw.is_some(), "retrieved record");
        Ok(raw)
    }

    /// Read and coerce the bytes under `key`. Absence stays `Ok(None)`;
    /// coercion failures propagate.
    pub async fn retrieve_with<T>(
        &self,
        key: &str,
        coerce: impl FnOnce(&[u8]) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.retrieve(key).await? {
            Some(raw) => Ok(Some(coerce(&raw)?)),
            None => Ok(None),
        }
    }

    /// Retrieve the value under `key` as an integer.
    pub async fn retrieve_int(&self, key: &str) -> Result<Option<i64>> {
        self.retrieve_with(key, value::to_int).await
    }

    /// Retrieve the value under `key` as UTF-8 text.
    pub async fn retrieve_str(&self, key: &str) -> Result<Option<String>> {
        self.retrieve_with(key, value::to_text).await
    }

    /// Flush the entire underlying store. Used for initialization and test
    /// isolation; must not race in-flight operations from other sessions.
    pub async fn reset(&self) -> Result<()> {
        info!(backend = self.store.name(), "flushing store");
        self.store.flush_all().await
    }

    /// How many times `store` has been invoked (counted attempts).
    pub async fn store_count(&self) -> Result<i64> {
        self.counter.count().await
    }

    /// Reconstruct the ordered input/output history of `store` calls.
    pub async fn replay(&self) -> Result<Replay> {
        self.history.replay().await
    }
}
