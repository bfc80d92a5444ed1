//! The positions request flow: cache lookup, upstream fetch on miss, projection.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::domain::listing::{PublicListing, parse_listings, project_listings};
use crate::error::Result;
use crate::ports::cache::ResponseCache;
use crate::ports::positions_client::PositionsClient;

pub struct PositionsService {
    client: Arc<dyn PositionsClient>,
    cache: Arc<dyn ResponseCache>,
    cache_ttl: Duration,
    background: TaskTracker,
}

impl PositionsService {
    pub fn new(
        client: Arc<dyn PositionsClient>,
        cache: Arc<dyn ResponseCache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            cache_ttl,
            background: TaskTracker::new(),
        }
    }

    /// Public listings, served from cache when a fresh entry exists.
    ///
    /// On a miss the upstream body is handed to the cache on a background task
    /// before it is parsed; the returned listings never wait on that write.
    pub async fn public_positions(&self) -> Result<Vec<PublicListing>> {
        let key = self.client.positions_url().to_string();

        if let Some(cached) = self.cache.lookup(&key).await {
            match parse_listings(&cached.body) {
                Ok(listings) => {
                    debug!(count = listings.len(), "Cache hit for positions");
                    return Ok(project_listings(listings));
                }
                Err(e) => {
                    warn!(error = %e, "Cached positions are not valid JSON, refetching");
                }
            }
        }

        debug!("Cache miss for positions");
        let fetched = self.client.fetch_positions().await?;

        let to_cache = fetched.clone().with_cache_control(self.cache_ttl);
        let cache = Arc::clone(&self.cache);
        self.background.spawn(async move {
            if let Err(e) = cache.put(&key, to_cache).await {
                warn!(error = %e, key = %key, "Failed to store positions in cache");
            }
        });

        let listings = parse_listings(&fetched.body)?;
        Ok(project_listings(listings))
    }

    /// [`Self::public_positions`] serialized as a JSON array.
    pub async fn render_positions(&self) -> Result<String> {
        let listings = self.public_positions().await?;
        Ok(serde_json::to_string(&listings)?)
    }

    /// Close the tracker and wait for every pending cache write.
    ///
    /// Writes spawned after this call are still tracked; calling it again waits for them too.
    pub async fn drain_background_tasks(&self) {
        self.background.close();
        self.background.wait().await;
    }

    pub fn pending_background_tasks(&self) -> usize {
        self.background.len()
    }
}
