//! Adaptive confidence thresholds for semantic search results.
//!
//! Instead of a fixed cutoff, the threshold and result cap are derived from the
//! shape of each result set's score distribution.

mod analyzer;
mod config;
mod stats;

pub use analyzer::{
    CutoffStrategy, DistributionAnalyzer, EMPTY_MAX_RESULTS, EMPTY_THRESHOLD, FilterDecision,
};
pub use config::{
    DEFAULT_CONFIDENCE, FALLBACK_FLOOR, FALLBACK_STEP, FALLBACK_TRIGGER, HIGH_CONFIDENCE,
    MAX_RESULTS_CAP, MIN_CONFIDENCE_CEILING, MIN_CONFIDENCE_FLOOR, MIN_RESULTS_CAP, RankerConfig,
};
pub use stats::{DistributionStats, Gap, MAX_GAPS, sort_descending};
