//! Key-value store collaborator.
//!
//! The facade never talks to a concrete store directly; everything goes
//! through the [`KvStore`] trait, which captures the minimal command set the
//! facade needs: get/set, set-with-expiry, atomic increment, list append,
//! list range read, and a global flush. Implementations map these onto
//! whatever the external store exposes (the commands are deliberately shaped
//! like GET/SET/SETEX/INCR/RPUSH/LRANGE/FLUSHALL).
//!
//! No cross-command atomicity is assumed: each method is one independent
//! remote operation, and callers that need stronger ordering (the call
//! history wrapper does) must provide it themselves.
//!
//! [`MemoryStore`] is the in-process implementation used for tests and
//! single-process deployments.

mod memory;

pub use memory::MemoryStore;

use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Abstract key-value store the facade is built on.
///
/// Expiry contract: once an entry's TTL has elapsed it must be treated as
/// absent by every read path, even if the implementation has not physically
/// evicted it yet.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the raw bytes stored under `key`, or `None` if absent/expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Write `value` under `key` with a time-to-live.
    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Atomically increment the integer at `key` by one and return the new
    /// value. A missing key counts from zero; non-numeric bytes are a
    /// command failure.
    async fn increment(&self, key: &str) -> Result<i64>;

    /// Append `value` to the tail of the list at `key`, creating the list if
    /// needed. Returns the new list length.
    async fn append_to_list(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Read the inclusive range `[start, stop]` of the list at `key`.
    /// Negative indices count from the end, so `(0, -1)` is the whole list.
    /// A missing list reads as empty.
    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Remove every entry in the store. Global and irreversible.
    async fn flush_all(&self) -> Result<()>;

    /// Short backend identifier for logging.
    fn name(&self) -> &'static str;
}
