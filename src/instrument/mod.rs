//! # Call Instrumentation Wrappers
//!
//! Composable wrappers that add call counting and call history around any
//! operation body, with the counters and logs living in the shared
//! [`crate::store::KvStore`] rather than in process memory.
//!
//! Each wrapper is constructed with an explicit, caller-supplied operation
//! name (no runtime introspection) and exposes an `invoke` method that takes
//! the operation body as an async closure, so behaviors compose at the call
//! site:
//!
//! ```rust
//! use cachetrace::{CallCounter, CallHistory, KvStore, MemoryStore};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
//! let counter = CallCounter::new(Arc::clone(&store), "greet");
//! let history = CallHistory::new(Arc::clone(&store), "greet");
//!
//! let name = "world";
//! let greeting = counter
//!     .invoke(|| history.invoke(&name, || async move {
//!         Ok::<_, cachetrace::Error>(format!("hello {name}"))
//!     }))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(greeting, "hello world");
//! assert_eq!(counter.count().await.unwrap(), 1);
//! assert_eq!(history.replay().await.unwrap().entries.len(), 1);
//! # });
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CallCounter`] | Increments a per-operation counter before the body runs |
//! | [`CallHistory`] | Appends (input, output) pairs to per-operation logs |
//! | [`Replay`] | Ordered reconstruction of a recorded history |

mod counter;
mod history;

pub use counter::CallCounter;
pub use history::{CallHistory, Replay, ReplayEntry};
