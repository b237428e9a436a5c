//! Main HTTP Gateway Server.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use docsift_config::{OcrConfig, ServerConfig};
use docsift_understanding::DocumentClassifier;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::classify_api;
use crate::cors::cors_layer;
use crate::health_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub classifier: DocumentClassifier,
    pub ocr: Arc<OcrConfig>,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(classifier: DocumentClassifier, ocr: OcrConfig) -> Self {
        Self {
            classifier,
            ocr: Arc::new(ocr),
            started_at: Instant::now(),
        }
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: GatewayState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_api::liveness))
        .route("/api/health", get(health_api::get_health))
        .route("/classify", post(classify_api::classify))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(cors_layer(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `server.socket_addr()` and serve until Ctrl-C or SIGTERM.
#[instrument(skip_all, fields(addr = %server.socket_addr()))]
pub async fn start_server(server: &ServerConfig, state: GatewayState) -> Result<()> {
    let app = build_router(state, server);
    let addr = server.socket_addr();

    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
