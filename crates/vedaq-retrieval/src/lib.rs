pub mod error;
pub mod location;
pub mod query;
pub mod ranker;
pub mod results;
pub mod threshold;

pub use error::FilterError;
pub use location::VerseLocation;
pub use query::QueryComplexity;
pub use ranker::{Cutoff, PINNED_CONFIDENCE, ResultRanker};
pub use results::{RankedOutcome, Scored, ScoredResult, VerseRecord};
pub use threshold::{
    CutoffStrategy, DistributionAnalyzer, DistributionStats, FilterDecision, Gap, RankerConfig,
};
