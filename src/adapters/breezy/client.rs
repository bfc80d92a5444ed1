use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use crate::config::types::UpstreamConfig;
use crate::domain::cached_response::CachedResponse;
use crate::error::{ProxyError, Result};
use crate::ports::positions_client::PositionsClient;

/// Client for the Breezy HR v3 positions endpoint.
pub struct BreezyClient {
    http: Client,
    positions_url: Url,
    authorization: HeaderValue,
}

impl BreezyClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProxyError::Config("upstream.api_key is not set".into()))?;
        let mut authorization = HeaderValue::from_str(api_key.expose()).map_err(|_| {
            ProxyError::Config("upstream.api_key contains characters not allowed in a header".into())
        })?;
        authorization.set_sensitive(true);

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            positions_url: build_positions_url(&config.base_url, &config.company_id, &config.state)?,
            authorization,
        })
    }
}

/// `<base>/v3/company/<company_id>/positions?state=<state>`
pub fn build_positions_url(base_url: &str, company_id: &str, state: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|()| ProxyError::Config(format!("upstream.base_url cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(["v3", "company", company_id, "positions"]);
    url.query_pairs_mut().clear().append_pair("state", state);
    Ok(url)
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_owned(), v.to_owned()))
        })
        .collect()
}

#[async_trait]
impl PositionsClient for BreezyClient {
    fn positions_url(&self) -> &Url {
        &self.positions_url
    }

    async fn fetch_positions(&self) -> Result<CachedResponse> {
        debug!("Fetching positions from upstream");

        let response = self
            .http
            .get(self.positions_url.clone())
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let headers = header_pairs(response.headers());
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Upstream positions received");
        Ok(CachedResponse::new(status.as_u16(), headers, body))
    }
}
