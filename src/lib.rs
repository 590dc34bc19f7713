//! # cachetrace
//!
//! An instrumented cache facade over an abstract key-value store: store
//! arbitrary primitive values under generated keys, retrieve them with
//! optional type coercion, and transparently record call counts and call
//! histories for any operation you wrap. A specialization caches the result
//! of an expensive fetch (an HTTP GET) keyed by its input, with a TTL.
//!
//! ## Core Philosophy
//!
//! - **Injected collaborator**: the store behind everything is a trait
//!   object passed at construction, never process-wide implicit state
//! - **Explicit names**: counters and history logs are keyed by
//!   caller-supplied operation names, resolved at wrapper construction
//! - **Composition over patching**: counting and history are composable
//!   wrapper objects invoked around an async body, not method rewrites
//!
//! ## Key Features
//!
//! - **Store/Retrieve**: [`Cache`] writes values under fresh UUID keys and
//!   reads them back raw or coerced ([`Cache::retrieve_int`],
//!   [`Cache::retrieve_str`])
//! - **Call counting**: [`CallCounter`] counts attempts through a single
//!   atomic store increment
//! - **Call history**: [`CallHistory`] records aligned (input, output) pairs
//!   and reconstructs them with [`CallHistory::replay`]
//! - **Fetch caching**: [`CachedFetcher`] counts requests per input and
//!   serves payloads from a TTL'd cache
//!
//! ## Quick Start
//!
//! ```rust
//! use cachetrace::{Cache, MemoryStore};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let cache = Cache::new(Arc::new(MemoryStore::new()));
//!
//! let key = cache.store("hello").await.unwrap();
//! assert_eq!(cache.retrieve_str(&key).await.unwrap(), Some("hello".into()));
//!
//! // The facade's own store calls are counted and logged.
//! assert_eq!(cache.store_count().await.unwrap(), 1);
//! println!("{}", cache.replay().await.unwrap());
//! # });
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`store`] | The [`KvStore`] collaborator trait and [`MemoryStore`] |
//! | [`cache`] | The store/retrieve facade and value coercions |
//! | [`instrument`] | Call counting and call history wrappers |
//! | [`fetch`] | Fetch-and-cache specialization |

pub mod cache;
pub mod error;
pub mod fetch;
pub mod instrument;
pub mod store;

// Re-export main types for convenience
pub use cache::{Cache, CacheConfig, Value};
pub use error::Error;
pub use fetch::{CachedFetcher, FetchConfig, FetchError, Fetcher, HttpFetcher};
pub use instrument::{CallCounter, CallHistory, Replay, ReplayEntry};
pub use store::{KvStore, MemoryStore};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
