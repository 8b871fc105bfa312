//! HTTP API for the web client
//!
//! The client fetches raw results from the semantic search backend and posts
//! them here to be ranked and filtered.

mod routes;
mod types;


pub use routes::create_router;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use vedaq_retrieval::ResultRanker;

/// Request bodies above 1 MB are rejected before they are parsed.
const MAX_BODY_SIZE: usize = 1024 * 1024;

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    match origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("Invalid CORS origin {:?}", origin))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => {
            warn!("No CORS origin given, any site may call the API. Pass --cors-origin to restrict it.");
            Ok(CorsLayer::very_permissive())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down HTTP API server");
}

/// Serve the ranking API until Ctrl+C.
pub async fn serve_http(ranker: ResultRanker, port: u16, cors_origin: Option<String>) -> Result<()> {
    let app: Router = create_router(Arc::new(ranker))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin.as_deref())?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Ranking API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
