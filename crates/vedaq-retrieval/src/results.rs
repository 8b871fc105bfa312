use crate::error::Result;
use crate::location::VerseLocation;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A search result that may carry a similarity score from the backend.
pub trait Scored {
    fn similarity_score(&self) -> Option<f64>;
}

/// A verse as returned by the semantic search backend.
///
/// Only the fields the filter and the response envelope need are typed; every
/// other field is kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerseRecord {
    pub fn new(location: &str, text: &str, similarity_score: Option<f64>) -> Self {
        Self {
            location: Some(location.to_string()),
            text: Some(text.to_string()),
            similarity_score,
            extra: Map::new(),
        }
    }

    /// Parse the record's location, if it has one.
    pub fn verse_location(&self) -> Option<Result<VerseLocation>> {
        self.location.as_deref().map(VerseLocation::parse)
    }
}

impl Scored for VerseRecord {
    fn similarity_score(&self) -> Option<f64> {
        self.similarity_score
    }
}

impl Scored for Value {
    fn similarity_score(&self) -> Option<f64> {
        self.get("similarity_score").and_then(Value::as_f64)
    }
}

/// A result with its confidence attached. The wrapped item is never modified.
///
/// Serializes as the item's fields plus `confidence`. A `confidence` field
/// already on the item is replaced by the attached one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredResult<T> {
    #[serde(flatten)]
    pub item: T,
    pub confidence: f64,
}

impl<T> ScoredResult<T> {
    pub fn new(item: T, confidence: f64) -> Self {
        Self { item, confidence }
    }
}

impl<T: Serialize> Serialize for ScoredResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut fields = match serde_json::to_value(&self.item).map_err(S::Error::custom)? {
            Value::Object(fields) => fields,
            other => {
                return Err(S::Error::custom(format!(
                    "scored item must serialize to a JSON object, got {}",
                    other
                )));
            }
        };
        fields.insert("confidence".to_string(), Value::from(self.confidence));
        fields.serialize(serializer)
    }
}

/// Filtered, ranked results plus the counts a caller needs to summarize them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOutcome<T> {
    pub filtered_results: Vec<ScoredResult<T>>,
    /// Number of results before filtering.
    pub total_fetched: usize,
    /// Results in `filtered_results` at or above the high-confidence cutoff.
    pub high_confidence_count: usize,
    /// Mean confidence of `filtered_results`, 0 when empty.
    pub average_confidence: f64,
    /// Whether the relaxed second pass produced `filtered_results`.
    pub fallback_applied: bool,
}

impl<T> RankedOutcome<T> {
    pub fn empty() -> Self {
        Self {
            filtered_results: Vec::new(),
            total_fetched: 0,
            high_confidence_count: 0,
            average_confidence: 0.0,
            fallback_applied: false,
        }
    }

    /// Build an outcome, deriving the summary counts from `filtered_results`.
    pub fn new(
        filtered_results: Vec<ScoredResult<T>>,
        total_fetched: usize,
        high_confidence: f64,
        fallback_applied: bool,
    ) -> Self {
        let high_confidence_count = filtered_results
            .iter()
            .filter(|r| r.confidence >= high_confidence)
            .count();
        let average_confidence = if filtered_results.is_empty() {
            0.0
        } else {
            filtered_results.iter().map(|r| r.confidence).sum::<f64>()
                / filtered_results.len() as f64
        };

        Self {
            filtered_results,
            total_fetched,
            high_confidence_count,
            average_confidence,
            fallback_applied,
        }
    }

    pub fn len(&self) -> usize {
        self.filtered_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_results.is_empty()
    }

    pub fn confidences(&self) -> impl Iterator<Item = f64> + '_ {
        self.filtered_results.iter().map(|r| r.confidence)
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.filtered_results.iter().map(|r| &r.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verse_record_keeps_unknown_fields() {
        let raw = json!({
            "location": "01.001.01",
            "text": "agnim ile purohitam",
            "similarity_score": 0.82,
            "translation": "I praise Agni, the chosen priest",
            "deity": "Agni"
        });

        let record: VerseRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.location.as_deref(), Some("01.001.01"));
        assert_eq!(record.similarity_score, Some(0.82));
        assert_eq!(record.extra.get("deity"), Some(&json!("Agni")));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_verse_record_missing_and_null_score() {
        let missing: VerseRecord = serde_json::from_value(json!({"text": "x"})).unwrap();
        assert_eq!(missing.similarity_score(), None);

        let null: VerseRecord =
            serde_json::from_value(json!({"text": "x", "similarity_score": null})).unwrap();
        assert_eq!(null.similarity_score(), None);
    }

    #[test]
    fn test_value_is_scored() {
        assert_eq!(json!({"similarity_score": 0.4}).similarity_score(), Some(0.4));
        assert_eq!(json!({"similarity_score": "high"}).similarity_score(), None);
        assert_eq!(json!({"text": "x"}).similarity_score(), None);
    }

    #[test]
    fn test_verse_location() {
        let record = VerseRecord::new("10.129.01", "nasad asin", Some(0.7));
        let location = record.verse_location().unwrap().unwrap();
        assert_eq!(location.audio_path(), "/audio/10/129/1");

        let no_location = VerseRecord::default();
        assert!(no_location.verse_location().is_none());
    }

    #[test]
    fn test_scored_result_serializes_flat() {
        let result = ScoredResult::new(VerseRecord::new("01.001.01", "agni", None), 0.5);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"location": "01.001.01", "text": "agni", "confidence": 0.5})
        );

        let back: ScoredResult<VerseRecord> = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_attached_confidence_replaces_item_field() {
        let raw = json!({
            "location": "01.001.01",
            "similarity_score": 0.8,
            "confidence": "backend"
        });
        let record: VerseRecord = serde_json::from_value(raw).unwrap();
        let result = ScoredResult::new(record, 0.8);

        let text = serde_json::to_string(&result).unwrap();
        assert_eq!(text.matches("\"confidence\"").count(), 1);

        let back: ScoredResult<VerseRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back.confidence, 0.8);
        assert!(!back.item.extra.contains_key("confidence"));
    }

    #[test]
    fn test_scored_result_rejects_non_object_item() {
        let result = ScoredResult::new(json!("bare string"), 0.5);
        assert!(serde_json::to_value(&result).is_err());
    }

    #[test]
    fn test_outcome_counts() {
        let results = vec![
            ScoredResult::new(VerseRecord::default(), 0.9),
            ScoredResult::new(VerseRecord::default(), 0.75),
            ScoredResult::new(VerseRecord::default(), 0.3),
        ];
        let outcome = RankedOutcome::new(results, 10, 0.75, false);

        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.total_fetched, 10);
        assert_eq!(outcome.high_confidence_count, 2);
        assert!((outcome.average_confidence - 0.65).abs() < 1e-12);
        assert!(!outcome.fallback_applied);
    }

    #[test]
    fn test_outcome_empty() {
        let outcome: RankedOutcome<VerseRecord> = RankedOutcome::empty();
        assert!(outcome.is_empty());
        assert_eq!(outcome.total_fetched, 0);
        assert_eq!(outcome.high_confidence_count, 0);
        assert_eq!(outcome.average_confidence, 0.0);

        let built: RankedOutcome<VerseRecord> = RankedOutcome::new(vec![], 0, 0.75, false);
        assert_eq!(built, outcome);
    }
}
