//! Configuration for the result ranker.

use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Confidence given to results the backend returned without a score.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Results at or above this confidence count as high-confidence.
pub const HIGH_CONFIDENCE: f64 = 0.75;

/// Bounds applied to the adjusted minimum confidence.
pub const MIN_CONFIDENCE_FLOOR: f64 = 0.1;
pub const MIN_CONFIDENCE_CEILING: f64 = 0.5;

/// Bounds applied to the adjusted result cap.
pub const MIN_RESULTS_CAP: usize = 8;
pub const MAX_RESULTS_CAP: usize = 30;

/// The fallback pass runs when fewer than this many results survive.
pub const FALLBACK_TRIGGER: usize = 5;

/// How far the fallback pass lowers the minimum confidence.
pub const FALLBACK_STEP: f64 = 0.1;

/// The fallback pass never goes below this minimum confidence.
pub const FALLBACK_FLOOR: f64 = 0.08;

/// Tunables for [`ResultRanker`](crate::ResultRanker).
///
/// Missing fields in a config file take their default, so a partial file only
/// overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub default_confidence: f64,
    pub high_confidence: f64,
    pub min_confidence_floor: f64,
    pub min_confidence_ceiling: f64,
    pub min_results_cap: usize,
    pub max_results_cap: usize,
    pub fallback_trigger: usize,
    pub fallback_step: f64,
    pub fallback_floor: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            default_confidence: DEFAULT_CONFIDENCE,
            high_confidence: HIGH_CONFIDENCE,
            min_confidence_floor: MIN_CONFIDENCE_FLOOR,
            min_confidence_ceiling: MIN_CONFIDENCE_CEILING,
            min_results_cap: MIN_RESULTS_CAP,
            max_results_cap: MAX_RESULTS_CAP,
            fallback_trigger: FALLBACK_TRIGGER,
            fallback_step: FALLBACK_STEP,
            fallback_floor: FALLBACK_FLOOR,
        }
    }
}

impl RankerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| FilterError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that every bound is usable.
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("default_confidence", self.default_confidence),
            ("high_confidence", self.high_confidence),
            ("min_confidence_floor", self.min_confidence_floor),
            ("min_confidence_ceiling", self.min_confidence_ceiling),
            ("fallback_step", self.fallback_step),
            ("fallback_floor", self.fallback_floor),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FilterError::invalid_config(format!(
                "{} must be a finite number",
                name
            )));
        }

        if self.min_confidence_floor > self.min_confidence_ceiling {
            return Err(FilterError::invalid_config(format!(
                "min_confidence_floor ({}) exceeds min_confidence_ceiling ({})",
                self.min_confidence_floor, self.min_confidence_ceiling
            )));
        }
        if self.min_results_cap == 0 {
            return Err(FilterError::invalid_config("min_results_cap must be at least 1"));
        }
        if self.min_results_cap > self.max_results_cap {
            return Err(FilterError::invalid_config(format!(
                "min_results_cap ({}) exceeds max_results_cap ({})",
                self.min_results_cap, self.max_results_cap
            )));
        }
        if self.fallback_step < 0.0 {
            return Err(FilterError::invalid_config("fallback_step must not be negative"));
        }

        Ok(())
    }
}
