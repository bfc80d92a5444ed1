//! Response shaping: the fixed header set and the failure body.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::types::CorsConfig;
use crate::error::{ProxyError, Result};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const ALLOWED_METHODS: &str = "GET";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// CORS headers stamped onto every response.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> Result<Self> {
        let allow_origin = HeaderValue::from_str(config.allowed_origin.trim()).map_err(|e| {
            ProxyError::Config(format!("cors.allowed_origin is not a valid header value: {e}"))
        })?;
        Ok(Self { allow_origin })
    }

    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    /// `Access-Control-Allow-{Origin,Methods,Headers}` layers, in that order.
    pub fn layers(&self) -> [SetResponseHeaderLayer<HeaderValue>; 3] {
        [
            SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                self.allow_origin.clone(),
            ),
            SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            ),
            SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOWED_HEADERS),
            ),
        ]
    }
}

pub fn json_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response()
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Positions request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.diagnostic()).into_response()
    }
}
