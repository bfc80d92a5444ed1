//! axum wiring for the positions endpoint.
//!
//! Every inbound request, whatever its method, path or body, is answered by
//! [`positions_handler`].

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::types::CorsConfig;
use crate::error::Result;
use crate::http::response::{CorsHeaders, json_response};
use crate::service::PositionsService;

pub struct HttpServer {
    router: Router,
    service: Arc<PositionsService>,
}

impl HttpServer {
    pub fn new(service: Arc<PositionsService>, cors: &CorsConfig) -> Result<Self> {
        let cors = CorsHeaders::from_config(cors)?;
        let router = build_router(Arc::clone(&service), &cors);
        Ok(Self { router, service })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` resolves, then wait for outstanding cache writes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!(
            pending = self.service.pending_background_tasks(),
            "Waiting for background cache writes"
        );
        self.service.drain_background_tasks().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

pub fn build_router(service: Arc<PositionsService>, cors: &CorsHeaders) -> Router {
    let [allow_origin, allow_methods, allow_headers] = cors.layers();
    Router::new()
        .fallback(positions_handler)
        .with_state(service)
        .layer(allow_origin)
        .layer(allow_methods)
        .layer(allow_headers)
        .layer(TraceLayer::new_for_http())
}

async fn positions_handler(State(service): State<Arc<PositionsService>>) -> Response {
    match service.render_positions().await {
        Ok(body) => json_response(body),
        Err(e) => e.into_response(),
    }
}

/// Resolves on Ctrl+C (and SIGTERM on unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
