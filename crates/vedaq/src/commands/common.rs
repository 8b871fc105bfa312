//! Common utilities for CLI commands

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};
use vedaq_retrieval::{RankerConfig, ResultRanker, VerseRecord};

/// Raw results as saved from the search backend: either a bare array or the
/// backend's response object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendPayload {
    Results(Vec<VerseRecord>),
    Response {
        #[serde(default)]
        query: Option<String>,
        results: Vec<VerseRecord>,
    },
}

/// Results loaded from disk, with the query if the payload carried one.
#[derive(Debug)]
pub struct LoadedResults {
    pub query: Option<String>,
    pub results: Vec<VerseRecord>,
}

/// Build a ranker from an optional JSON config file.
pub fn load_ranker(config: Option<&Path>) -> Result<ResultRanker> {
    let config = match config {
        Some(path) => {
            let config = RankerConfig::load(path)
                .with_context(|| format!("Failed to load ranker config {:?}", path))?;
            info!("Loaded ranker config from {:?}", path);
            config
        }
        None => RankerConfig::default(),
    };
    Ok(ResultRanker::with_config(config))
}

/// Read backend results from a JSON file.
pub fn read_results(path: &Path) -> Result<LoadedResults> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file {:?}", path))?;
    let payload: BackendPayload = serde_json::from_str(&json).with_context(|| {
        format!(
            "{:?} is neither a JSON array of results nor an object with a `results` array",
            path
        )
    })?;

    let loaded = match payload {
        BackendPayload::Results(results) => LoadedResults {
            query: None,
            results,
        },
        BackendPayload::Response { query, results } => LoadedResults { query, results },
    };
    debug!("Read {} results from {:?}", loaded.results.len(), path);

    Ok(loaded)
}

/// Pick the query to rank with: the explicit argument wins over the one saved
/// in the payload. Blank queries are rejected.
pub fn resolve_query(explicit: Option<String>, saved: Option<String>) -> Result<String> {
    let query = explicit.or(saved).unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Query cannot be empty. Pass --query or include \"query\" in the results file.");
    }
    Ok(query.to_string())
}

/// First `max_chars` characters of a verse, on one line.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_results_array() {
        let file = write_temp(r#"[{"location": "01.001.01", "similarity_score": 0.8}, {"text": "x"}]"#);
        let loaded = read_results(file.path()).unwrap();
        assert!(loaded.query.is_none());
        assert_eq!(loaded.results.len(), 2);
        assert_eq!(loaded.results[0].similarity_score, Some(0.8));
    }

    #[test]
    fn test_read_results_response_object() {
        let file = write_temp(
            r#"{"query": "agni", "total_results": 1, "results": [{"location": "01.001.01"}]}"#,
        );
        let loaded = read_results(file.path()).unwrap();
        assert_eq!(loaded.query.as_deref(), Some("agni"));
        assert_eq!(loaded.results.len(), 1);
    }

    #[test]
    fn test_read_results_rejects_other_json() {
        let file = write_temp(r#"{"error": "backend unavailable"}"#);
        let err = read_results(file.path()).unwrap_err();
        assert!(err.to_string().contains("neither a JSON array"));
    }

    #[test]
    fn test_read_results_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_results(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_load_ranker_default() {
        let ranker = load_ranker(None).unwrap();
        assert_eq!(ranker.config(), &RankerConfig::default());
    }

    #[test]
    fn test_load_ranker_from_file() {
        let file = write_temp(r#"{"high_confidence": 0.8}"#);
        let ranker = load_ranker(Some(file.path())).unwrap();
        assert_eq!(ranker.config().high_confidence, 0.8);
    }

    #[test]
    fn test_load_ranker_invalid_file() {
        let file = write_temp(r#"{"min_results_cap": 50}"#);
        assert!(load_ranker(Some(file.path())).is_err());
    }

    #[test]
    fn test_resolve_query() {
        assert_eq!(
            resolve_query(Some(" fire ".to_string()), Some("dawn".to_string())).unwrap(),
            "fire"
        );
        assert_eq!(resolve_query(None, Some("dawn".to_string())).unwrap(), "dawn");
        assert!(resolve_query(None, None).is_err());
        assert!(resolve_query(Some("   ".to_string()), None).is_err());
    }

    #[test]
    fn test_snippet() {
        assert_eq!(snippet("agnim ile\npurohitam", 100), "agnim ile purohitam");
        assert_eq!(snippet("agnim ile purohitam", 9), "agnim ile…");
    }
}
