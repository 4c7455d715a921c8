//! Search results and their text serialization.
//!
//! Results cross the C ABI as JSON text:
//!
//! ```text
//! {"total":2,"hits":[{"key":"doc1","score":0.6931472},{"key":"doc2","score":0.6931472}]}
//! ```
//!
//! Field order is fixed and floats are printed in their shortest
//! round-trip form, so equal results always serialize to equal text.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Key of the matching document.
    pub key: String,

    /// Relevance score; higher is better.
    pub score: f32,
}

/// Ranked hits of one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Number of matching documents before truncation to the result limit.
    pub total: usize,

    /// Hits ordered by descending score, then ascending key.
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    /// An empty result.
    pub fn empty() -> Self {
        SearchResults::default()
    }

    /// Number of returned hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether no hits were returned.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Keys of the returned hits, in rank order.
    pub fn keys(&self) -> Vec<&str> {
        self.hits.iter().map(|hit| hit.key.as_str()).collect()
    }

    /// Score of the hit for `key`, if it was returned.
    pub fn score_of(&self, key: &str) -> Option<f32> {
        self.hits.iter().find(|hit| hit.key == key).map(|hit| hit.score)
    }

    /// Serialize to the compact JSON form handed to callers.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse results previously produced by [`SearchResults::to_json`].
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_serialization() {
        assert_eq!(
            SearchResults::empty().to_json().unwrap(),
            r#"{"total":0,"hits":[]}"#
        );
    }

    #[test]
    fn test_serialization_shape() {
        let results = SearchResults {
            total: 3,
            hits: vec![
                SearchHit {
                    key: "b\"quoted\"".to_string(),
                    score: 2.0,
                },
                SearchHit {
                    key: "a".to_string(),
                    score: 1.5,
                },
            ],
        };

        let json = results.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"total":3,"hits":[{"key":"b\"quoted\"","score":2.0},{"key":"a","score":1.5}]}"#
        );
        assert_eq!(SearchResults::from_json(&json).unwrap(), results);
        assert_eq!(results.keys(), vec!["b\"quoted\"", "a"]);
        assert_eq!(results.score_of("a"), Some(1.5));
        assert_eq!(results.score_of("missing"), None);
    }
}
