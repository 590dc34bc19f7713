//! Call counting wrapper.

use crate::cache::to_int;
use crate::store::KvStore;
use crate::Result;
use std::future::Future;
use std::sync::Arc;

/// Counts invocations of one named operation.
///
/// The increment is issued before the body runs, so the counter tracks
/// attempts rather than successes; body errors pass through untouched. The
/// increment is a single atomic store command and needs no coordination
/// under concurrency.
pub struct CallCounter {
    store: Arc<dyn KvStore>,
    name: String,
}

impl CallCounter {
    pub fn new(store: Arc<dyn KvStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Count one invocation, then run the body and return its result
    /// unchanged.
    pub async fn invoke<T, F, Fut>(&self, body: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.store.increment(&self.name).await?;
        body().await
    }

    /// Current invocation count; zero when the operation was never called.
    pub async fn count(&self) -> Result<i64> {
        match self.store.get(&self.name).await? {
            Some(raw) => to_int(&raw),
            None => Ok(0),
        }
    }
}
