//! Integration tests for the fetch-and-cache specialization.

use async_trait::async_trait;
use bytes::Bytes;
use cachetrace::{CachedFetcher, Error, FetchConfig, Fetcher, HttpFetcher, MemoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted fetcher that counts how often it is actually invoked.
#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(&self, input: &str) -> cachetrace::Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::from(format!("payload:{input}")))
    }
}

struct FailingFetcher;

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, _input: &str) -> cachetrace::Result<Bytes> {
        Err(cachetrace::FetchError::Other("offline".into()).into())
    }
}

#[tokio::test]
async fn second_call_within_ttl_serves_cache() {
    let fetcher = Arc::new(CountingFetcher::default());
    let cached = CachedFetcher::new(Arc::new(MemoryStore::new()), Arc::clone(&fetcher) as Arc<dyn Fetcher>);

    let first = cached.get("http://example.com").await.unwrap();
    let second = cached.get("http://example.com").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(cached.request_count("http://example.com").await.unwrap(), 2);
}

#[tokio::test]
async fn expired_entry_triggers_a_refetch() {
    let fetcher = Arc::new(CountingFetcher::default());
    let config = FetchConfig::new().with_ttl(Duration::from_millis(40));
    let cached = CachedFetcher::with_config(
        Arc::new(MemoryStore::new()),
        Arc::clone(&fetcher) as Arc<dyn Fetcher>,
        config,
    );

    cached.get("k").await.unwrap();
    cached.get("k").await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(60)).await;

    cached.get("k").await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(cached.request_count("k").await.unwrap(), 3);
}

#[tokio::test]
async fn inputs_are_cached_independently() {
    let fetcher = Arc::new(CountingFetcher::default());
    let cached = CachedFetcher::new(Arc::new(MemoryStore::new()), Arc::clone(&fetcher) as Arc<dyn Fetcher>);

    let a = cached.get("a").await.unwrap();
    let b = cached.get("b").await.unwrap();

    assert_ne!(a, b);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(cached.request_count("a").await.unwrap(), 1);
    assert_eq!(cached.request_count("b").await.unwrap(), 1);
}

#[tokio::test]
async fn failed_fetch_propagates_but_still_counts() {
    let cached = CachedFetcher::new(Arc::new(MemoryStore::new()), Arc::new(FailingFetcher));

    let err = cached.get("k").await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)), "got {err:?}");
    assert_eq!(cached.request_count("k").await.unwrap(), 1);

    // Nothing was cached, so the next attempt fails again and counts again.
    cached.get("k").await.unwrap_err();
    assert_eq!(cached.request_count("k").await.unwrap(), 2);
}

#[tokio::test]
async fn http_fetcher_caches_page_bodies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/page")
        .with_status(200)
        .with_body("<html>hi</html>")
        .expect(1)
        .create_async()
        .await;
    let url = format!("{}/page", server.url());

    let cached = CachedFetcher::new(
        Arc::new(MemoryStore::new()),
        Arc::new(HttpFetcher::new().unwrap()),
    );

    let first = cached.get(&url).await.unwrap();
    let second = cached.get(&url).await.unwrap();

    assert_eq!(first, Bytes::from("<html>hi</html>"));
    assert_eq!(first, second);
    assert_eq!(cached.request_count(&url).await.unwrap(), 2);
    // expect(1) verifies the upstream saw a single request.
    mock.assert_async().await;
}

#[tokio::test]
async fn http_fetcher_reports_error_statuses() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;
    let url = format!("{}/missing", server.url());

    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();
    assert!(
        matches!(err, Error::Fetch(cachetrace::FetchError::Status(404))),
        "got {err:?}"
    );
}
