//! # Store/Retrieve Core
//!
//! The [`Cache`] facade stores primitive values under generated keys and
//! retrieves them with optional type coercion, while transparently counting
//! and logging its own `store` calls through the [`crate::instrument`]
//! wrappers.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Cache`] | Instrumented store/retrieve facade |
//! | [`CacheConfig`] | Instrumentation configuration (operation name, toggles) |
//! | [`Value`] | Closed set of storable primitives |
//! | [`to_int`] / [`to_float`] / [`to_text`] | Byte coercion helpers |
//!
//! ## Example
//!
//! ```rust
//! use cachetrace::{Cache, MemoryStore};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let cache = Cache::new(Arc::new(MemoryStore::new()));
//!
//! let key = cache.store("hello").await.unwrap();
//! assert_eq!(cache.retrieve_str(&key).await.unwrap(), Some("hello".to_string()));
//!
//! let key = cache.store(42i64).await.unwrap();
//! assert_eq!(cache.retrieve_int(&key).await.unwrap(), Some(42));
//! # });
//! ```

mod facade;
mod value;

pub use facade::{Cache, CacheConfig};
pub use value::{to_float, to_int, to_text, Value};
