//! Error types for result filtering.
//!
//! Ranking itself is total and never fails; errors only come from the edges
//! of the crate: parsing verse locations and loading ranker configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by `vedaq-retrieval`.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A verse location did not have the `MANDALA.HYMN.STANZA` shape.
    #[error("Invalid verse location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("Failed to read ranker config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse ranker config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but holds values the ranker cannot use.
    #[error("Invalid ranker config: {reason}")]
    InvalidConfig { reason: String },
}

impl FilterError {
    pub(crate) fn invalid_location(location: &str, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
