pub mod types;

use std::path::Path;

use url::Url;

use crate::error::{ProxyError, Result};
use crate::http::response::CorsHeaders;
use types::{ApiKey, Config};

pub const ENV_API_KEY: &str = "BREEZY_API_KEY";
pub const ENV_COMPANY_ID: &str = "BREEZY_COMPANY_ID";
pub const ENV_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";
pub const ENV_BIND_ADDRESS: &str = "JOB_BOARD_PROXY_BIND";

/// Upper bound for `cache.ttl_secs`: one year.
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Load the YAML file (if any), apply process environment overrides and validate.
pub fn load_config(path: &Path) -> Result<Config> {
    load_config_with_env(path, |name| std::env::var(name).ok())
}

pub fn load_config_with_env(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = read_config_file(path)?;
    apply_env_overrides(&mut config, env);
    validate(&config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ProxyError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

pub fn apply_env_overrides(config: &mut Config, env: impl Fn(&str) -> Option<String>) {
    if let Some(key) = env(ENV_API_KEY) {
        config.upstream.api_key = Some(ApiKey::new(key));
    }
    if let Some(company_id) = env(ENV_COMPANY_ID) {
        config.upstream.company_id = company_id;
    }
    if let Some(origin) = env(ENV_ALLOWED_ORIGIN) {
        config.cors.allowed_origin = origin;
    }
    if let Some(bind) = env(ENV_BIND_ADDRESS) {
        config.server.bind_address = bind;
    }
}

pub fn validate(config: &Config) -> Result<()> {
    if config.upstream.company_id.trim().is_empty() {
        return Err(ProxyError::Config(format!(
            "upstream.company_id is empty (set it in the config file or {ENV_COMPANY_ID})"
        )));
    }
    match &config.upstream.api_key {
        Some(key) if !key.is_empty() => {}
        _ => {
            return Err(ProxyError::Config(format!(
                "upstream.api_key is not set (export {ENV_API_KEY})"
            )));
        }
    }
    Url::parse(&config.upstream.base_url)?;

    let origin = config.cors.allowed_origin.trim();
    if origin.is_empty() {
        return Err(ProxyError::Config(format!(
            "cors.allowed_origin is empty (set it in the config file or {ENV_ALLOWED_ORIGIN})"
        )));
    }
    CorsHeaders::from_config(&config.cors)?;

    if config.cache.ttl_secs == 0 {
        return Err(ProxyError::Config("cache.ttl_secs must be positive".into()));
    }
    if config.cache.ttl_secs > MAX_TTL_SECS {
        return Err(ProxyError::Config(format!(
            "cache.ttl_secs must be at most {MAX_TTL_SECS}, got {}",
            config.cache.ttl_secs
        )));
    }
    Ok(())
}
