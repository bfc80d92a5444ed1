use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::Instant;

use async_trait::async_trait;
use lru::LruCache;

use crate::domain::cached_response::CachedResponse;
use crate::error::Result;
use crate::ports::cache::ResponseCache;

struct CacheEntry {
    response: CachedResponse,
    expires_at: Instant,
}

/// In-process LRU store. Entries expire at `stored_at + max-age`.
pub struct MemoryCache {
    inner: RwLock<LruCache<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or_else(|| {
            tracing::warn!("Cache max_entries was 0, defaulting to 16");
            NonZeroUsize::new(16).unwrap_or(NonZeroUsize::MIN)
        });
        Self {
            inner: RwLock::new(LruCache::new(cap)),
        }
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<CachedResponse> {
        let mut cache = self.inner.write().map_or_else(
            |_| {
                tracing::error!("Cache lock poisoned on lookup('{key}'), returning miss");
                None
            },
            Some,
        )?;
        let entry = cache.get(key)?;
        if now >= entry.expires_at {
            cache.pop(key);
            return None;
        }
        Some(entry.response.clone())
    }

    fn put_at(&self, key: &str, response: CachedResponse, now: Instant) {
        let Some(ttl) = response.max_age() else {
            tracing::debug!(key, "Response carries no max-age, not caching");
            return;
        };
        let Some(expires_at) = now.checked_add(ttl) else {
            tracing::warn!(key, ttl_secs = ttl.as_secs(), "max-age overflows the clock, not caching");
            return;
        };
        if let Ok(mut cache) = self.inner.write() {
            cache.put(key.to_string(), CacheEntry { response, expires_at });
        } else {
            tracing::error!("Cache lock poisoned on put('{key}'), skipping write");
        }
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn lookup(&self, key: &str) -> Option<CachedResponse> {
        self.get_at(key, Instant::now())
    }

    async fn put(&self, key: &str, response: CachedResponse) -> Result<()> {
        self.put_at(key, response, Instant::now());
        Ok(())
    }
}
