//! Start the HTTP API server

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::common::load_ranker;

pub async fn serve(config: Option<PathBuf>, port: u16, cors_origin: Option<String>) -> Result<()> {
    let ranker = load_ranker(config.as_deref())?;

    info!("Starting vedaq HTTP API server");
    info!(
        min_results = ranker.config().min_results_cap,
        max_results = ranker.config().max_results_cap,
        "Ranker configured"
    );

    crate::http::serve_http(ranker, port, cors_origin).await
}
