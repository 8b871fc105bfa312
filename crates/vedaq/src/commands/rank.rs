//! Rank a saved set of backend results

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::common::{load_ranker, read_results, resolve_query, snippet};
use crate::envelope::SearchEnvelope;

pub fn rank(file: &Path, query: Option<String>, config: Option<PathBuf>, json: bool) -> Result<()> {
    let ranker = load_ranker(config.as_deref())?;
    let loaded = read_results(file)?;
    let query = resolve_query(query, loaded.query)?;

    let outcome = ranker.rank(loaded.results, &query);
    let envelope = SearchEnvelope::search(&query, outcome);

    if json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    println!("{}", envelope.summary);
    if let Some(ref metadata) = envelope.search_metadata {
        println!(
            "Fetched {} | high confidence {} | average confidence {:.2}{}\n",
            metadata.total_fetched,
            metadata.high_confidence_count,
            metadata.average_confidence,
            if metadata.fallback_applied {
                " | relaxed cutoff"
            } else {
                ""
            }
        );
    }

    for verse in &envelope.verses {
        let record = &verse.verse.item;
        println!(
            "📜 {} (confidence: {:.2})",
            record.location.as_deref().unwrap_or("unknown location"),
            verse.verse.confidence
        );
        if let Some(ref text) = record.text {
            println!("   {}", snippet(text, 100));
        }
        if let Some(ref audio) = verse.audio_path {
            println!("   audio: {}", audio);
        }
        println!();
    }

    Ok(())
}
