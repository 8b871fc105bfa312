//! HTTP API routes and handlers

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use vedaq_retrieval::ResultRanker;

use super::types::*;
use crate::envelope::SearchEnvelope;

type AppState = Arc<ResultRanker>;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maximum query length in characters.
const MAX_QUERY_LEN: usize = 500;

/// Maximum number of raw results accepted per request.
const MAX_RESULTS_PER_REQUEST: usize = 1000;

/// Create the router with all API endpoints
pub fn create_router(ranker: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rank", post(rank))
        .route("/explore", post(explore))
        .with_state(ranker)
}

fn bad_request(error: &str, code: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
        }),
    )
}

fn check_result_count(count: usize) -> Result<(), ApiError> {
    if count > MAX_RESULTS_PER_REQUEST {
        return Err(bad_request(
            "Too many results, at most 1000 are accepted",
            "TOO_MANY_RESULTS",
        ));
    }
    Ok(())
}

// ============================================
// Health
// ============================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================
// Rank
// ============================================

async fn rank(
    State(ranker): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<SearchEnvelope>, ApiError> {
    let start = Instant::now();

    // Validate query
    let query = req.query.trim();
    if query.is_empty() {
        return Err(bad_request("Query cannot be empty", "INVALID_QUERY"));
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(bad_request(
            "Query exceeds maximum length of 500 characters",
            "QUERY_TOO_LONG",
        ));
    }
    check_result_count(req.results.len())?;

    debug!(query = %query, results = req.results.len(), "HTTP rank request");

    let outcome = ranker.rank(req.results, query);

    info!(
        query = %query,
        fetched = outcome.total_fetched,
        shown = outcome.len(),
        fallback = outcome.fallback_applied,
        time_us = start.elapsed().as_micros() as u64,
        "Ranked search results"
    );

    Ok(Json(SearchEnvelope::search(query, outcome)))
}

// ============================================
// Explore
// ============================================

async fn explore(
    State(ranker): State<AppState>,
    Json(req): Json<ExploreRequest>,
) -> Result<Json<SearchEnvelope>, ApiError> {
    check_result_count(req.results.len())?;

    debug!(results = req.results.len(), "HTTP explore request");

    let outcome = ranker.pin(req.results);
    Ok(Json(SearchEnvelope::exploration(outcome)))
}
