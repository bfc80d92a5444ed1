use async_trait::async_trait;
use url::Url;

use crate::domain::cached_response::CachedResponse;
use crate::error::Result;

#[async_trait]
pub trait PositionsClient: Send + Sync {
    /// Fully-qualified upstream URL, query included. Doubles as the cache key.
    fn positions_url(&self) -> &Url;

    /// Fetch the positions. Non-2xx statuses come back as `ProxyError::Upstream`.
    async fn fetch_positions(&self) -> Result<CachedResponse>;
}
