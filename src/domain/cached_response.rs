use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const CACHE_CONTROL: &str = "cache-control";

/// An upstream response as handed to the cache: status, headers and the raw body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CachedResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Append `Cache-Control: public, max-age=<ttl>` so the store knows how long to keep it.
    #[must_use]
    pub fn with_cache_control(mut self, ttl: Duration) -> Self {
        self.headers.push((
            CACHE_CONTROL.to_string(),
            format!("public, max-age={}", ttl.as_secs()),
        ));
        self
    }

    /// The last `max-age` directive across all `Cache-Control` headers.
    pub fn max_age(&self) -> Option<Duration> {
        self.headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(CACHE_CONTROL))
            .flat_map(|(_, value)| value.split(','))
            .filter_map(|directive| {
                let (key, secs) = directive.trim().split_once('=')?;
                if !key.trim().eq_ignore_ascii_case("max-age") {
                    return None;
                }
                secs.trim().trim_matches('"').parse::<u64>().ok()
            })
            .last()
            .map(Duration::from_secs)
    }
}
