use serde::{Deserialize, Serialize};

/// Queries with at most this many words are treated as short.
pub const SHORT_QUERY_MAX_WORDS: usize = 2;

/// Queries with at least this many words are treated as long.
pub const LONG_QUERY_MIN_WORDS: usize = 6;

/// How specific a query is, judged by its word count.
///
/// Short queries match broadly and noisily, so they get a stricter cutoff and
/// fewer results. Long queries are specific and get more room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryComplexity {
    Short,
    Moderate,
    Long,
}

impl QueryComplexity {
    pub fn from_query(query: &str) -> Self {
        Self::from_word_count(word_count(query))
    }

    pub fn from_word_count(words: usize) -> Self {
        if words <= SHORT_QUERY_MAX_WORDS {
            Self::Short
        } else if words >= LONG_QUERY_MIN_WORDS {
            Self::Long
        } else {
            Self::Moderate
        }
    }

    /// Added to the distribution threshold.
    pub fn threshold_adjustment(&self) -> f64 {
        match self {
            Self::Short => 0.02,
            Self::Moderate => 0.0,
            Self::Long => -0.02,
        }
    }

    /// Added to the distribution result cap.
    pub fn max_results_adjustment(&self) -> i64 {
        match self {
            Self::Short => -3,
            Self::Moderate => 0,
            Self::Long => 5,
        }
    }
}

impl std::fmt::Display for QueryComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Short => write!(f, "short"),
            Self::Moderate => write!(f, "moderate"),
            Self::Long => write!(f, "long"),
        }
    }
}

/// Number of whitespace-separated words.
pub fn word_count(query: &str) -> usize {
    query.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("agni"), 1);
        assert_eq!(word_count("  fire   ritual "), 2);
        assert_eq!(word_count("dawn\tgoddess\nushas"), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_complexity_boundaries() {
        assert_eq!(QueryComplexity::from_word_count(0), QueryComplexity::Short);
        assert_eq!(QueryComplexity::from_word_count(2), QueryComplexity::Short);
        assert_eq!(QueryComplexity::from_word_count(3), QueryComplexity::Moderate);
        assert_eq!(QueryComplexity::from_word_count(5), QueryComplexity::Moderate);
        assert_eq!(QueryComplexity::from_word_count(6), QueryComplexity::Long);
        assert_eq!(QueryComplexity::from_word_count(12), QueryComplexity::Long);
    }

    #[test]
    fn test_complexity_from_query() {
        assert_eq!(QueryComplexity::from_query("fire ritual"), QueryComplexity::Short);
        assert_eq!(
            QueryComplexity::from_query("agni fire sacrifice"),
            QueryComplexity::Moderate
        );
        assert_eq!(
            QueryComplexity::from_query("fire sacrifice agni sacred ritual offerings"),
            QueryComplexity::Long
        );
    }

    #[test]
    fn test_adjustments() {
        assert_eq!(QueryComplexity::Short.threshold_adjustment(), 0.02);
        assert_eq!(QueryComplexity::Short.max_results_adjustment(), -3);
        assert_eq!(QueryComplexity::Moderate.threshold_adjustment(), 0.0);
        assert_eq!(QueryComplexity::Moderate.max_results_adjustment(), 0);
        assert_eq!(QueryComplexity::Long.threshold_adjustment(), -0.02);
        assert_eq!(QueryComplexity::Long.max_results_adjustment(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryComplexity::Short.to_string(), "short");
        assert_eq!(QueryComplexity::Long.to_string(), "long");
    }
}
