//! HTTP API request and response types

use serde::{Deserialize, Serialize};
use vedaq_retrieval::VerseRecord;

// ============================================
// Rank
// ============================================

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub query: String,
    #[serde(default)]
    pub results: Vec<VerseRecord>,
}

// ============================================
// Explore
// ============================================

#[derive(Debug, Deserialize)]
pub struct ExploreRequest {
    #[serde(default)]
    pub results: Vec<VerseRecord>,
}

// ============================================
// Health
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============================================
// Error
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
