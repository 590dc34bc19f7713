//! Fetch-and-cache specialization.
//!
//! [`CachedFetcher`] wraps any [`Fetcher`] (typically [`HttpFetcher`]) with a
//! per-input request counter and a TTL'd payload cache held in the shared
//! key-value store. Per input the lifecycle is uncached → cached for the TTL
//! → uncached again; cache hits cause no state transition.

mod cached;
mod http;

pub use cached::{CachedFetcher, FetchConfig};
pub use http::{FetchError, Fetcher, HttpFetcher};
