//! Response envelope shared by the CLI's JSON output and the HTTP API.
//!
//! The ranker only returns counts; the wording shown to readers is built here.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vedaq_retrieval::{RankedOutcome, ScoredResult, VerseRecord};

/// Query label used for random exploration results.
pub const EXPLORATION_QUERY: &str = "Random Vedic Wisdom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SemanticSearch,
    RandomExploration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseResponse {
    #[serde(flatten)]
    pub verse: ScoredResult<VerseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
}

impl From<ScoredResult<VerseRecord>> for VerseResponse {
    fn from(mut verse: ScoredResult<VerseRecord>) -> Self {
        let audio_path = match verse.item.verse_location() {
            Some(Ok(location)) => Some(location.audio_path()),
            Some(Err(e)) => {
                debug!("No audio for verse: {}", e);
                None
            }
            None => None,
        };
        if audio_path.is_some() {
            verse.item.extra.remove("audio_path");
        }
        Self { verse, audio_path }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub total_fetched: usize,
    pub display_count: usize,
    pub high_confidence_count: usize,
    pub average_confidence: f64,
    pub fallback_applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub intent: Intent,
    pub query: String,
    pub summary: String,
    pub verses: Vec<VerseResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_metadata: Option<SearchMetadata>,
}

impl SearchEnvelope {
    /// Wrap ranked search results.
    pub fn search(query: &str, outcome: RankedOutcome<VerseRecord>) -> Self {
        let metadata = SearchMetadata {
            total_fetched: outcome.total_fetched,
            display_count: outcome.len(),
            high_confidence_count: outcome.high_confidence_count,
            average_confidence: outcome.average_confidence,
            fallback_applied: outcome.fallback_applied,
        };

        Self {
            intent: Intent::SemanticSearch,
            query: query.to_string(),
            summary: format!(
                "Found {} relevant verses related to \"{}\"",
                outcome.len(),
                query
            ),
            verses: outcome.filtered_results.into_iter().map(Into::into).collect(),
            search_metadata: Some(metadata),
        }
    }

    /// Wrap a pinned, randomly selected set of verses.
    pub fn exploration(outcome: RankedOutcome<VerseRecord>) -> Self {
        Self {
            intent: Intent::RandomExploration,
            query: EXPLORATION_QUERY.to_string(),
            summary: format!(
                "Discover {} randomly selected verses from the Rig Veda",
                outcome.total_fetched
            ),
            verses: outcome.filtered_results.into_iter().map(Into::into).collect(),
            search_metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vedaq_retrieval::ResultRanker;

    fn verses() -> Vec<VerseRecord> {
        vec![
            VerseRecord::new("01.001.01", "agnim ile purohitam", Some(0.91)),
            VerseRecord::new("01.001.02", "agnih purvebhir", Some(0.88)),
            VerseRecord::new("bad-location", "unplaced", Some(0.2)),
        ]
    }

    #[test]
    fn test_search_envelope() {
        let outcome = ResultRanker::new().rank(verses(), "agni");
        let envelope = SearchEnvelope::search("agni", outcome);

        assert_eq!(envelope.intent, Intent::SemanticSearch);
        assert_eq!(envelope.query, "agni");
        assert_eq!(envelope.summary, "Found 2 relevant verses related to \"agni\"");

        let metadata = envelope.search_metadata.unwrap();
        assert_eq!(metadata.total_fetched, 3);
        assert_eq!(metadata.display_count, 2);
        assert_eq!(metadata.high_confidence_count, 2);
        assert_eq!(envelope.verses[0].audio_path.as_deref(), Some("/audio/1/1/1"));
    }

    #[test]
    fn test_exploration_envelope() {
        let outcome = ResultRanker::new().pin(verses());
        let envelope = SearchEnvelope::exploration(outcome);

        assert_eq!(envelope.intent, Intent::RandomExploration);
        assert_eq!(envelope.query, EXPLORATION_QUERY);
        assert_eq!(
            envelope.summary,
            "Discover 3 randomly selected verses from the Rig Veda"
        );
        assert!(envelope.search_metadata.is_none());
        assert!(envelope.verses.iter().all(|v| v.verse.confidence == 1.0));
        assert!(envelope.verses[2].audio_path.is_none());
    }

    #[test]
    fn test_envelope_json_shape() {
        let outcome = ResultRanker::new().pin(vec![VerseRecord::new("02.012.03", "yo jata", None)]);
        let value = serde_json::to_value(SearchEnvelope::exploration(outcome)).unwrap();

        assert_eq!(value["intent"], json!("random_exploration"));
        assert_eq!(value["verses"][0]["location"], json!("02.012.03"));
        assert_eq!(value["verses"][0]["confidence"], json!(1.0));
        assert_eq!(value["verses"][0]["audio_path"], json!("/audio/2/12/3"));
        assert!(value.get("search_metadata").is_none());
    }

    #[test]
    fn test_computed_audio_path_replaces_backend_field() {
        let mut record = VerseRecord::new("01.001.01", "agnim ile", Some(0.9));
        record.extra.insert("audio_path".to_string(), json!("/old/path.mp3"));

        let outcome = ResultRanker::new().pin(vec![record]);
        let envelope = SearchEnvelope::exploration(outcome);
        let text = serde_json::to_string(&envelope).unwrap();

        assert_eq!(text.matches("\"audio_path\"").count(), 1);
        let back: SearchEnvelope = serde_json::from_str(&text).unwrap();
        assert_eq!(back.verses[0].audio_path.as_deref(), Some("/audio/1/1/1"));
    }
}
