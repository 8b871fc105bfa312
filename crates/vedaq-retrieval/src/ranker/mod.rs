//! Confidence-based ranking and filtering of semantic search results.
//!
//! The `ResultRanker` sorts raw backend results by confidence, derives a cutoff
//! from the score distribution, tightens or loosens it for the query, and runs
//! a relaxed second pass when too few results survive.

use crate::query::QueryComplexity;
use crate::results::{RankedOutcome, Scored, ScoredResult};
use crate::threshold::{DistributionAnalyzer, FilterDecision, RankerConfig};
use tracing::debug;

/// Confidence given to results that were picked rather than ranked.
pub const PINNED_CONFIDENCE: f64 = 1.0;

/// Effective cutoff after query adjustment and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoff {
    pub min_confidence: f64,
    pub max_results: usize,
}

impl Cutoff {
    fn passes<T>(&self, result: &ScoredResult<T>) -> bool {
        result.confidence >= self.min_confidence
    }

    fn count_passing<T>(&self, sorted: &[ScoredResult<T>]) -> usize {
        sorted
            .iter()
            .filter(|r| self.passes(r))
            .take(self.max_results)
            .count()
    }
}

/// Ranks and filters search results. Stateless apart from its configuration,
/// so a single instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ResultRanker {
    config: RankerConfig,
    analyzer: DistributionAnalyzer,
}

impl ResultRanker {
    /// Create a ranker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RankerConfig::default())
    }

    /// Create a ranker with a custom configuration.
    pub fn with_config(config: RankerConfig) -> Self {
        Self {
            config,
            analyzer: DistributionAnalyzer::new(),
        }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank `results` for `query` and keep the ones worth showing.
    pub fn rank<T: Scored>(&self, results: Vec<T>, query: &str) -> RankedOutcome<T> {
        let total_fetched = results.len();
        if results.is_empty() {
            debug!("No results to rank");
            return RankedOutcome::empty();
        }

        let sorted = self.attach_confidence(results);
        let scores: Vec<f64> = sorted.iter().map(|r| r.confidence).collect();

        let decision = self.analyzer.analyze(&scores);
        let complexity = QueryComplexity::from_query(query);
        let mut cutoff = self.cutoff(&decision, complexity);

        let mut kept = cutoff.count_passing(&sorted);
        let fallback_applied =
            kept < self.config.fallback_trigger && total_fetched >= self.config.fallback_trigger;

        if fallback_applied {
            let relaxed = self.fallback_cutoff(&cutoff);
            let relaxed_kept = relaxed.count_passing(&sorted);
            debug!(
                kept,
                relaxed_kept,
                min_confidence = relaxed.min_confidence,
                max_results = relaxed.max_results,
                "Too few results passed, applying relaxed cutoff"
            );
            cutoff = relaxed;
            kept = relaxed_kept;
        }

        let filtered: Vec<ScoredResult<T>> = sorted
            .into_iter()
            .filter(|r| cutoff.passes(r))
            .take(cutoff.max_results)
            .collect();

        debug!(
            total = total_fetched,
            kept,
            complexity = %complexity,
            strategy = %decision.strategy,
            min_confidence = cutoff.min_confidence,
            max_results = cutoff.max_results,
            "Ranked results"
        );

        RankedOutcome::new(
            filtered,
            total_fetched,
            self.config.high_confidence,
            fallback_applied,
        )
    }

    /// Wrap results that were picked rather than searched for (random
    /// exploration). Every result gets full confidence and nothing is dropped
    /// or reordered.
    pub fn pin<T>(&self, results: Vec<T>) -> RankedOutcome<T> {
        let total_fetched = results.len();
        let pinned = results
            .into_iter()
            .map(|item| ScoredResult::new(item, PINNED_CONFIDENCE))
            .collect();
        RankedOutcome::new(pinned, total_fetched, self.config.high_confidence, false)
    }

    /// Apply the query adjustment to a distribution decision and clamp it.
    pub fn cutoff(&self, decision: &FilterDecision, complexity: QueryComplexity) -> Cutoff {
        let min_confidence = (decision.threshold + complexity.threshold_adjustment())
            .min(self.config.min_confidence_ceiling)
            .max(self.config.min_confidence_floor);

        let max_results = (decision.max_results as i64 + complexity.max_results_adjustment())
            .min(self.config.max_results_cap as i64)
            .max(self.config.min_results_cap as i64);

        Cutoff {
            min_confidence,
            max_results: max_results.max(0) as usize,
        }
    }

    /// The looser cutoff used by the second pass.
    pub fn fallback_cutoff(&self, cutoff: &Cutoff) -> Cutoff {
        Cutoff {
            min_confidence: (cutoff.min_confidence - self.config.fallback_step)
                .max(self.config.fallback_floor),
            max_results: cutoff.max_results.max(self.config.min_results_cap),
        }
    }

    /// Attach confidence to each result and sort highest first. The sort is
    /// stable: equal confidences keep their input order.
    ///
    /// A score of exactly 0 counts as missing and gets the default confidence.
    fn attach_confidence<T: Scored>(&self, results: Vec<T>) -> Vec<ScoredResult<T>> {
        let mut scored: Vec<ScoredResult<T>> = results
            .into_iter()
            .map(|item| {
                let confidence = item
                    .similarity_score()
                    .filter(|score| *score != 0.0)
                    .unwrap_or(self.config.default_confidence);
                ScoredResult::new(item, confidence)
            })
            .collect();
        scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        scored
    }
}
