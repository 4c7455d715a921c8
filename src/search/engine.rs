//! Resolves parsed queries against the inverted index.

use ahash::AHashMap;

use crate::index::inverted::InvertedIndex;
use crate::search::query::Query;
use crate::search::result::{SearchHit, SearchResults};
use crate::search::scoring::{CollectionStats, ScoringFunction};

/// Scores and ranks documents for a query.
///
/// Ranking is descending score, ties broken by ascending key, so the output
/// for a given query and index state is fully deterministic.
#[derive(Debug)]
pub struct QueryEngine {
    scoring: Box<dyn ScoringFunction>,
    max_results: usize,
    min_score: f32,
}

impl QueryEngine {
    /// Create a query engine.
    pub fn new(scoring: Box<dyn ScoringFunction>, max_results: usize, min_score: f32) -> Self {
        QueryEngine {
            scoring,
            max_results,
            min_score,
        }
    }

    /// The scoring function in use.
    pub fn scoring(&self) -> &dyn ScoringFunction {
        self.scoring.as_ref()
    }

    /// Run `query` against `index`.
    ///
    /// Documents containing none of the query terms are not returned; an
    /// empty query returns an empty result.
    pub fn search(&self, query: &Query, index: &InvertedIndex) -> SearchResults {
        if query.is_empty() {
            return SearchResults::empty();
        }

        let stats = CollectionStats {
            total_docs: index.doc_count(),
            avg_doc_length: index.avg_doc_length(),
        };

        let mut scores: AHashMap<&str, f32> = AHashMap::new();
        for term in query.terms() {
            let df = index.doc_frequency(term);
            if df == 0 {
                continue;
            }
            for (key, posting) in index.lookup(term) {
                let doc_length = index.doc_length(key).unwrap_or(0);
                let contribution =
                    self.scoring
                        .term_score(posting.frequency, df, doc_length, &stats);
                *scores.entry(key).or_insert(0.0) += contribution;
            }
        }

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .filter(|(_, score)| *score >= self.min_score)
            .map(|(key, score)| SearchHit {
                key: key.to_string(),
                score,
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.key.cmp(&b.key)));

        let total = hits.len();
        hits.truncate(self.max_results);

        SearchResults { total, hits }
    }
}
