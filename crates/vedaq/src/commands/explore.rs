//! Show a randomly selected set of verses without filtering

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::common::{load_ranker, read_results, snippet};
use crate::envelope::SearchEnvelope;

pub fn explore(file: &Path, config: Option<PathBuf>, json: bool) -> Result<()> {
    let ranker = load_ranker(config.as_deref())?;
    let loaded = read_results(file)?;

    let envelope = SearchEnvelope::exploration(ranker.pin(loaded.results));

    if json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    println!("{}\n", envelope.summary);
    for verse in &envelope.verses {
        let record = &verse.verse.item;
        println!(
            "📜 {}",
            record.location.as_deref().unwrap_or("unknown location")
        );
        if let Some(ref text) = record.text {
            println!("   {}", snippet(text, 100));
        }
        println!();
    }

    Ok(())
}
