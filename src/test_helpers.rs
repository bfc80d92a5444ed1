use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use url::Url;

use crate::adapters::breezy::client::build_positions_url;
use crate::adapters::cache::memory_cache::MemoryCache;
use crate::domain::cached_response::CachedResponse;
use crate::error::{ProxyError, Result};
use crate::ports::cache::ResponseCache;
use crate::ports::positions_client::PositionsClient;

pub fn sample_positions_body() -> String {
    r#"[{"_id":"1","type":"fulltime","name":"Engineer","friendly_id":"eng-1","experience":"senior","location":"Remote","education":"BS","department":"Eng","description":"...","category":"Tech","creation_date":"2024-01-01","updated_date":"2024-01-02","tags":["go"],"pipeline_id":"internal"},{"_id":"2","type":"contract","name":"Designer","friendly_id":"design-2","experience":null,"location":{"name":"Lisbon"},"education":"","department":"Design","description":"<p>hi</p>","category":"Creative","creation_date":"2024-02-01","updated_date":"2024-02-03","tags":[]}]"#
        .to_string()
}

pub fn sample_public_body() -> String {
    r#"[{"_id":"1","type":"fulltime","name":"Engineer","url":"eng-1","experience":"senior","location":"Remote","education":"BS","department":"Eng","description":"...","category":"Tech","creation_date":"2024-01-01","updated_date":"2024-01-02","tags":["go"]},{"_id":"2","type":"contract","name":"Designer","url":"design-2","experience":null,"location":{"name":"Lisbon"},"education":"","department":"Design","description":"<p>hi</p>","category":"Creative","creation_date":"2024-02-01","updated_date":"2024-02-03","tags":[]}]"#
        .to_string()
}

type FetchFn = Box<dyn Fn() -> Result<CachedResponse> + Send + Sync>;

/// Upstream stand-in that counts fetches.
pub struct StubPositionsClient {
    url: Url,
    fetch_fn: Mutex<FetchFn>,
    fetches: AtomicUsize,
}

impl StubPositionsClient {
    pub fn new(f: impl Fn() -> Result<CachedResponse> + Send + Sync + 'static) -> Self {
        Self {
            url: build_positions_url("https://api.breezy.hr", "test-co", "published").unwrap(),
            fetch_fn: Mutex::new(Box::new(f)),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move || {
            Ok(CachedResponse::new(
                200,
                vec![("content-type".into(), "application/json".into())],
                body.clone(),
            ))
        })
    }

    pub fn failing(status: u16, body: &'static str) -> Self {
        Self::new(move || {
            Err(ProxyError::Upstream {
                status,
                body: body.to_string(),
            })
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionsClient for StubPositionsClient {
    fn positions_url(&self) -> &Url {
        &self.url
    }

    async fn fetch_positions(&self) -> Result<CachedResponse> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let f = self.fetch_fn.lock().unwrap();
        f()
    }
}

/// `MemoryCache` wrapper that counts calls and can be told to reject writes.
pub struct RecordingCache {
    inner: MemoryCache,
    lookups: AtomicUsize,
    puts: AtomicUsize,
    fail_puts: bool,
}

impl Default for RecordingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCache::new(16),
            lookups: AtomicUsize::new(0),
            puts: AtomicUsize::new(0),
            fail_puts: false,
        }
    }

    #[must_use]
    pub fn failing_puts(mut self) -> Self {
        self.fail_puts = true;
        self
    }

    /// Insert directly, bypassing the counters. The response needs a `max-age`.
    pub async fn seed(&self, key: &str, response: CachedResponse) {
        assert!(response.max_age().is_some(), "seeded response needs max-age");
        self.inner.put(key, response).await.unwrap();
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResponseCache for RecordingCache {
    async fn lookup(&self, key: &str) -> Option<CachedResponse> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(key).await
    }

    async fn put(&self, key: &str, response: CachedResponse) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts {
            return Err(ProxyError::Config("cache store unavailable".into()));
        }
        self.inner.put(key, response).await
    }
}
