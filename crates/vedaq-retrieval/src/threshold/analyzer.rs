//! Derives a confidence cutoff and result cap from the shape of a score
//! distribution.

use super::stats::DistributionStats;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Threshold used when there are no scores to look at.
pub const EMPTY_THRESHOLD: f64 = 0.65;

/// Result cap used when there are no scores to look at.
pub const EMPTY_MAX_RESULTS: usize = 15;

/// Which branch of the cutoff cascade produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffStrategy {
    /// No scores; conservative defaults.
    Empty,
    /// A high top score followed by a pronounced drop.
    SharpCutoff,
    /// A moderate drop near the top of the ranking.
    EarlyGap,
    /// Upper half tightly packed at a reasonable confidence.
    DenseCluster,
    /// Scores spread over a wide range with no clear elbow.
    WideSpread,
    /// Everything else, typically a flat distribution.
    Flat,
}

impl std::fmt::Display for CutoffStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::SharpCutoff => write!(f, "sharp_cutoff"),
            Self::EarlyGap => write!(f, "early_gap"),
            Self::DenseCluster => write!(f, "dense_cluster"),
            Self::WideSpread => write!(f, "wide_spread"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

/// Working cutoff before any query-specific adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterDecision {
    /// Minimum confidence a result must reach.
    pub threshold: f64,
    /// Maximum number of results to surface.
    pub max_results: usize,
    pub strategy: CutoffStrategy,
}

impl Default for FilterDecision {
    fn default() -> Self {
        Self {
            threshold: EMPTY_THRESHOLD,
            max_results: EMPTY_MAX_RESULTS,
            strategy: CutoffStrategy::Empty,
        }
    }
}

/// Picks a `(threshold, max_results)` pair suited to a score distribution.
///
/// The decision is a priority cascade: the first matching branch wins. The
/// constants in each branch are tuned against Rig Veda similarity scores and
/// are kept as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionAnalyzer;

impl DistributionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze unsorted confidence scores.
    pub fn analyze(&self, scores: &[f64]) -> FilterDecision {
        let Some(stats) = DistributionStats::compute(scores) else {
            debug!("No scores to analyze, using default cutoff");
            return FilterDecision::default();
        };

        let decision = Self::decide(&stats);

        debug!(
            count = stats.count,
            top_score = stats.top_score,
            score_range = stats.score_range,
            q1 = stats.q1,
            q2 = stats.q2,
            q3 = stats.q3,
            best_gap = stats.best_gap().map(|g| g.gap_size),
            strategy = %decision.strategy,
            threshold = decision.threshold,
            max_results = decision.max_results,
            "Analyzed confidence distribution"
        );

        decision
    }

    /// Run the cutoff cascade over precomputed statistics.
    pub fn decide(stats: &DistributionStats) -> FilterDecision {
        let n = stats.count;

        if let Some(gap) = stats.best_gap() {
            if stats.top_score >= 0.5 && gap.gap_size > 0.05 {
                return FilterDecision {
                    threshold: gap.score_after_gap.max(0.2),
                    max_results: (gap.position + 5).min(15),
                    strategy: CutoffStrategy::SharpCutoff,
                };
            }

            if gap.gap_size > 0.04 && gap.position < 25 {
                return FilterDecision {
                    threshold: gap.score_after_gap.max(0.15),
                    max_results: (gap.position + 8).min(20),
                    strategy: CutoffStrategy::EarlyGap,
                };
            }
        }

        if stats.q1 >= 0.35 && stats.interquartile_spread() < 0.15 {
            return FilterDecision {
                threshold: (stats.q3 - 0.02).max(0.18),
                max_results: (n * 3 / 4 + 5).min(18),
                strategy: CutoffStrategy::DenseCluster,
            };
        }

        if stats.score_range > 0.15 {
            return FilterDecision {
                threshold: stats.q2.max(0.15),
                max_results: (n / 2 + 10).min(25),
                strategy: CutoffStrategy::WideSpread,
            };
        }

        FilterDecision {
            threshold: stats.q3.max(0.1),
            max_results: n.min(30),
            strategy: CutoffStrategy::Flat,
        }
    }
}
