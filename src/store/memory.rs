//! In-memory store implementation.

use super::KvStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Clone)]
enum Payload {
    Value(Vec<u8>),
    List(Vec<Vec<u8>>),
}

#[derive(Clone)]
struct Entry {
    payload: Payload,
    expires_at: Option<Instant>,
}

impl Entry {
    fn value(data: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            payload: Payload::Value(data),
            expires_at: ttl.map(|t| Instant::now() + t),
        }
    }

    fn list() -> Self {
        Self {
            payload: Payload::List(Vec::new()),
            expires_at: None,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.map(|at| Instant::now() >= at).unwrap_or(false)
    }
}

/// In-process [`KvStore`] over a locked hash map.
///
/// A single keyspace holds both scalar and list entries; accessing a key
/// with the wrong command is a store-level error. Expired entries are
/// dropped lazily on access.
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a live entry, evicting it first if its TTL has elapsed.
    fn live_entry<'a>(
        entries: &'a mut HashMap<String, Entry>,
        key: &str,
    ) -> Option<&'a mut Entry> {
        if entries.get(key).map(|e| e.is_expired()).unwrap_or(false) {
            entries.remove(key);
        }
        entries.get_mut(key)
    }

    fn wrong_type(key: &str) -> Error {
        Error::store(format!("WRONGTYPE operation against key `{key}`"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().unwrap();
        match Self::live_entry(&mut entries, key) {
            Some(entry) => match &entry.payload {
                Payload::Value(data) => Ok(Some(data.clone())),
                Payload::List(_) => Err(Self::wrong_type(key)),
            },
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), Entry::value(value.to_vec(), None));
        Ok(())
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), Entry::value(value.to_vec(), Some(ttl)));
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().unwrap();
        let current = match Self::live_entry(&mut entries, key) {
            Some(entry) => match &entry.payload {
                Payload::Value(data) => std::str::from_utf8(data)
                    .ok()
                    .and_then(|s| s.parse::<i64>().ok())
                    .ok_or_else(|| {
                        Error::store(format!("value at `{key}` is not an integer"))
                    })?,
                Payload::List(_) => return Err(Self::wrong_type(key)),
            },
            None => 0,
        };
        let next = current + 1;
        // INCR keeps any TTL the entry already carries.
        let expires_at = entries.get(key).and_then(|e| e.expires_at);
        entries.insert(
            key.to_string(),
            Entry {
                payload: Payload::Value(next.to_string().into_bytes()),
                expires_at,
            },
        );
        Ok(next)
    }

    async fn append_to_list(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries.write().unwrap();
        if entries.get(key).map(|e| e.is_expired()).unwrap_or(false) {
            entries.remove(key);
        }
        let entry = entries.entry(key.to_string()).or_insert_with(Entry::list);
        match &mut entry.payload {
            Payload::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            Payload::Value(_) => Err(Self::wrong_type(key)),
        }
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let mut entries = self.entries.write().unwrap();
        match Self::live_entry(&mut entries, key) {
            Some(entry) => match &entry.payload {
                Payload::List(items) => Ok(match normalize_range(items.len(), start, stop) {
                    Some((lo, hi)) => items[lo..=hi].to_vec(),
                    None => Vec::new(),
                }),
                Payload::Value(_) => Err(Self::wrong_type(key)),
            },
            None => Ok(Vec::new()),
        }
    }

    async fn flush_all(&self) -> Result<()> {
        self.entries.write().unwrap().clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Clamp an LRANGE-style inclusive index pair to `[0, len)`. Returns `None`
/// for an empty selection.
fn normalize_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let start = if start < 0 { start + len } else { start }.max(0);
    let stop = if stop < 0 { stop + len } else { stop }.min(len - 1);
    if start > stop {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trip() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store.set("k", b"v").await.unwrap();
            assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
            assert_eq!(store.get("missing").await.unwrap(), None);
        });
    }

    #[test]
    fn expired_entry_reads_as_absent() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store
                .set_with_expiry("k", b"v", Duration::from_millis(10))
                .await
                .unwrap();
            assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
            tokio::time::sleep(Duration::from_millis(25)).await;
            assert_eq!(store.get("k").await.unwrap(), None);
        });
    }

    #[test]
    fn increment_counts_from_zero() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            assert_eq!(store.increment("n").await.unwrap(), 1);
            assert_eq!(store.increment("n").await.unwrap(), 2);
            assert_eq!(store.get("n").await.unwrap(), Some(b"2".to_vec()));
        });
    }

    #[test]
    fn increment_rejects_non_numeric_bytes() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store.set("n", b"not a number").await.unwrap();
            assert!(store.increment("n").await.is_err());
        });
    }

    #[test]
    fn list_range_handles_negative_indices() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            for item in [b"a".as_slice(), b"b", b"c"] {
                store.append_to_list("l", item).await.unwrap();
            }
            let all = store.list_range("l", 0, -1).await.unwrap();
            assert_eq!(all, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
            let tail = store.list_range("l", -2, -1).await.unwrap();
            assert_eq!(tail, vec![b"b".to_vec(), b"c".to_vec()]);
            assert!(store.list_range("l", 2, 1).await.unwrap().is_empty());
            assert!(store.list_range("missing", 0, -1).await.unwrap().is_empty());
        });
    }

    #[test]
    fn scalar_and_list_commands_do_not_mix() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store.set("k", b"v").await.unwrap();
            assert!(store.append_to_list("k", b"x").await.is_err());
            store.append_to_list("l", b"x").await.unwrap();
            assert!(store.get("l").await.is_err());
        });
    }

    #[test]
    fn flush_all_clears_everything() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store.set("k", b"v").await.unwrap();
            store.append_to_list("l", b"x").await.unwrap();
            store.flush_all().await.unwrap();
            assert_eq!(store.get("k").await.unwrap(), None);
            assert!(store.list_range("l", 0, -1).await.unwrap().is_empty());
        });
    }
}
