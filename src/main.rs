use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use job_board_proxy::adapters::breezy::client::BreezyClient;
use job_board_proxy::adapters::cache::memory_cache::MemoryCache;
use job_board_proxy::config::load_config;
use job_board_proxy::http::HttpServer;
use job_board_proxy::http::server::shutdown_signal;
use job_board_proxy::ports::cache::ResponseCache;
use job_board_proxy::ports::positions_client::PositionsClient;
use job_board_proxy::service::PositionsService;

fn find_config_path() -> PathBuf {
    let candidates = [
        PathBuf::from("config.yaml"),
        binary_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    tracing::info!("Starting job-board-proxy");

    let config = load_config(&find_config_path())?;
    tracing::info!(
        bind_address = %config.server.bind_address,
        cache_ttl_secs = config.cache.ttl_secs,
        allowed_origin = %config.cors.allowed_origin,
        "Configuration loaded"
    );

    let cache: Arc<dyn ResponseCache> = Arc::new(MemoryCache::new(config.cache.max_entries));
    let client: Arc<dyn PositionsClient> = Arc::new(BreezyClient::new(&config.upstream)?);

    let service = Arc::new(PositionsService::new(
        client,
        cache,
        Duration::from_secs(config.cache.ttl_secs),
    ));
    let server = HttpServer::new(service, &config.cors)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
