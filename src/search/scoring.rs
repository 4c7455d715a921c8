//! Relevance scoring functions.
//!
//! A document's score is the sum, over the query terms it contains, of the
//! per-term contribution computed here. Every function in this module gives
//! a strictly positive contribution that grows with term frequency, so a
//! document's score also grows with the number of query terms it covers.

use serde::{Deserialize, Serialize};

/// Collection statistics for scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionStats {
    /// Total number of documents.
    pub total_docs: usize,

    /// Average document length in terms.
    pub avg_doc_length: f32,
}

/// Pluggable per-term scoring.
pub trait ScoringFunction: Send + Sync + std::fmt::Debug {
    /// Contribution of one query term to one document's score.
    ///
    /// # Arguments
    ///
    /// * `tf` - Occurrences of the term in the document (at least 1)
    /// * `df` - Number of documents containing the term (at least 1)
    /// * `doc_length` - Number of terms in the document
    /// * `stats` - Collection-wide statistics
    fn term_score(&self, tf: u32, df: usize, doc_length: u32, stats: &CollectionStats) -> f32;

    /// Get function name.
    fn name(&self) -> &'static str;
}

/// Which scoring function the engine uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringKind {
    /// Raw term frequency.
    Frequency,
    /// Term frequency × inverse document frequency.
    #[default]
    TfIdf,
    /// Okapi BM25.
    Bm25,
}

/// BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term frequency saturation.
    pub k1: f32,

    /// Document length normalization.
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.2, b: 0.75 }
    }
}

impl ScoringKind {
    /// Build the scoring function for this kind.
    pub fn build(self, bm25: Bm25Params) -> Box<dyn ScoringFunction> {
        match self {
            ScoringKind::Frequency => Box::new(FrequencyScoringFunction),
            ScoringKind::TfIdf => Box::new(TfIdfScoringFunction),
            ScoringKind::Bm25 => Box::new(Bm25ScoringFunction::new(bm25)),
        }
    }
}

/// Baseline: the contribution is the raw term frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyScoringFunction;

impl ScoringFunction for FrequencyScoringFunction {
    fn term_score(&self, tf: u32, _df: usize, _doc_length: u32, _stats: &CollectionStats) -> f32 {
        tf as f32
    }

    fn name(&self) -> &'static str {
        "frequency"
    }
}

/// `tf × ln(1 + N / df)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScoringFunction;

impl ScoringFunction for TfIdfScoringFunction {
    fn term_score(&self, tf: u32, df: usize, _doc_length: u32, stats: &CollectionStats) -> f32 {
        let df = df.max(1) as f32;
        let idf = (1.0 + stats.total_docs as f32 / df).ln();
        tf as f32 * idf
    }

    fn name(&self) -> &'static str {
        "tf_idf"
    }
}

/// Okapi BM25 with the non-negative `ln(1 + ...)` IDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bm25ScoringFunction {
    params: Bm25Params,
}

impl Bm25ScoringFunction {
    /// Create a BM25 scorer with the given parameters.
    pub fn new(params: Bm25Params) -> Self {
        Bm25ScoringFunction { params }
    }
}

impl ScoringFunction for Bm25ScoringFunction {
    fn term_score(&self, tf: u32, df: usize, doc_length: u32, stats: &CollectionStats) -> f32 {
        let Bm25Params { k1, b } = self.params;
        let n = stats.total_docs as f32;
        let df = df.max(1) as f32;
        let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();

        let tf = tf as f32;
        let length_ratio = if stats.avg_doc_length > 0.0 {
            doc_length as f32 / stats.avg_doc_length
        } else {
            1.0
        };
        let tf_component = (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * length_ratio));

        idf * tf_component
    }

    fn name(&self) -> &'static str {
        "bm25"
    }
}
