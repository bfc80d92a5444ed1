use async_trait::async_trait;

use crate::domain::cached_response::CachedResponse;
use crate::error::Result;

/// URL-keyed response store with TTL expiry.
///
/// Implementations may drop entries at any time; a missing entry is always a
/// plain miss, never an error. The entry lifetime comes from the `max-age`
/// directive of the stored response.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn lookup(&self, key: &str) -> Option<CachedResponse>;
    async fn put(&self, key: &str, response: CachedResponse) -> Result<()>;
}
