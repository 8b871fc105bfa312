//! Statistical summary of a confidence distribution.

use serde::{Deserialize, Serialize};

/// Number of leading adjacent pairs inspected for gaps.
pub const MAX_GAPS: usize = 20;

/// Drop between two adjacent scores in a descending sort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    /// Index of the higher score of the pair.
    pub position: usize,
    /// `sorted[position] - sorted[position + 1]`.
    pub gap_size: f64,
    /// The lower score of the pair, i.e. the first score below the gap.
    pub score_after_gap: f64,
}

/// Statistics computed from a set of confidence scores.
///
/// Quartiles are plain index lookups into the *descending* sort, so `q1` sits
/// on the high-confidence side and `q3` on the low-confidence side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    /// Number of scores.
    pub count: usize,
    /// `sorted[n / 4]`.
    pub q1: f64,
    /// `sorted[n / 2]`.
    pub q2: f64,
    /// `sorted[3n / 4]`.
    pub q3: f64,
    /// Highest score.
    pub top_score: f64,
    /// Highest minus lowest score.
    pub score_range: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Gaps over the first [`MAX_GAPS`] adjacent pairs, largest first.
    /// Equal gaps keep ascending position order.
    pub gaps: Vec<Gap>,
}

impl DistributionStats {
    /// Compute statistics from unsorted scores.
    ///
    /// Returns `None` if the input is empty.
    pub fn compute(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let sorted = sort_descending(scores);
        let count = sorted.len();

        let mut gaps: Vec<Gap> = sorted
            .windows(2)
            .take(MAX_GAPS)
            .enumerate()
            .map(|(position, pair)| Gap {
                position,
                gap_size: pair[0] - pair[1],
                score_after_gap: pair[1],
            })
            .collect();
        // Stable: ties stay in position order
        gaps.sort_by(|a, b| b.gap_size.total_cmp(&a.gap_size));

        let top_score = sorted[0];
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Some(Self {
            count,
            q1: quartile(&sorted, 1),
            q2: quartile(&sorted, 2),
            q3: quartile(&sorted, 3),
            top_score,
            score_range: top_score - sorted[count - 1],
            mean,
            gaps,
        })
    }

    /// The largest gap, if there are at least two scores.
    pub fn best_gap(&self) -> Option<&Gap> {
        self.gaps.first()
    }

    /// Spread between the high-side and low-side quartiles.
    pub fn interquartile_spread(&self) -> f64 {
        self.q1 - self.q3
    }
}

/// Sort scores highest first.
///
/// Uses `total_cmp` so NaN input still yields a total order; positive NaN sorts
/// ahead of every finite score.
pub fn sort_descending(scores: &[f64]) -> Vec<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

/// `sorted[floor(n * quarter / 4)]`, no interpolation.
fn quartile(sorted: &[f64], quarter: usize) -> f64 {
    let index = sorted.len() * quarter / 4;
    sorted[index.min(sorted.len() - 1)]
}
