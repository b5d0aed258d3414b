//! Tablefix server - HTTP front-end for the tablefix library.
//!
//! Exposes two endpoints:
//! - `GET /health` - liveness probe with a UTC timestamp
//! - `POST /process` - accepts a DOCX (multipart `file` field or raw
//!   binary body) and returns it with every table reformatted
//!
//! Each request is handled in isolation: the document lives only for the
//! duration of the request and nothing is shared between requests.

pub mod config;
pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
pub use error::{AppError, AppResult};

/// Create the application router.
pub fn create_router(config: ServerConfig) -> Router {
    let max_body_size = config.max_body_size;
    Router::new()
        .route("/health", get(handlers::health))
        .route("/process", post(handlers::process_document))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

/// Run the server with the given configuration.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    run_with_shutdown(config, std::future::pending()).await
}

/// Run the server with graceful shutdown support.
pub async fn run_with_shutdown<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = config.listen_addr.parse()?;
    let app = create_router(config);

    info!("Starting tablefix server on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
