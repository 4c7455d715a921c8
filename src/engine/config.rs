//! Configuration for the engine.
//!
//! Every field has a default, so a JSON file only needs the settings it
//! changes:
//!
//! ```json
//! { "max_results": 20, "scoring": "bm25", "bm25": { "k1": 1.5 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FabricError, Result};
use crate::search::engine::QueryEngine;
use crate::search::metrics::DEFAULT_WINDOW_SIZE;
use crate::search::scoring::{Bm25Params, ScoringKind};

/// Environment variable naming a JSON config file for the C ABI.
pub const CONFIG_ENV_VAR: &str = "FABRIC_CONFIG";

/// Engine configuration.
///
/// Unknown keys are rejected, so settings this engine does not support (such
/// as `enable_fuzzy`) fail loudly instead of being ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of hits returned by one search.
    pub max_results: usize,

    /// Hits scoring below this are dropped.
    pub min_score: f32,

    /// Relevance function.
    pub scoring: ScoringKind,

    /// Parameters used when `scoring` is `bm25`.
    pub bm25: Bm25Params,

    /// Number of recent searches kept by the metrics window.
    pub metrics_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_results: 100,
            min_score: 0.0,
            scoring: ScoringKind::default(),
            bm25: Bm25Params::default(),
            metrics_window: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl EngineConfig {
    /// Set the maximum number of hits per search.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the minimum score of returned hits.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the scoring function.
    pub fn with_scoring(mut self, scoring: ScoringKind) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the BM25 parameters.
    pub fn with_bm25(mut self, bm25: Bm25Params) -> Self {
        self.bm25 = bm25;
        self
    }

    /// Set the metrics window size.
    pub fn with_metrics_window(mut self, metrics_window: usize) -> Self {
        self.metrics_window = metrics_window;
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            FabricError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// Load the file named by `FABRIC_CONFIG`, or the defaults if unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(FabricError::config("max_results must be at least 1"));
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(FabricError::config(
                "min_score must be a finite, non-negative number",
            ));
        }
        // k1 = 0 removes term frequency from BM25 entirely.
        if !(self.bm25.k1.is_finite() && self.bm25.k1 > 0.0) {
            return Err(FabricError::config("bm25.k1 must be a finite, positive number"));
        }
        if !(0.0..=1.0).contains(&self.bm25.b) {
            return Err(FabricError::config("bm25.b must be between 0 and 1"));
        }
        Ok(())
    }

    /// Build the query engine described by this config.
    pub fn query_engine(&self) -> QueryEngine {
        QueryEngine::new(
            self.scoring.build(self.bm25),
            self.max_results,
            self.min_score,
        )
    }
}
