//! Free-text queries.

use ahash::AHashSet;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// A parsed query: the unique normalized terms of the query text, in order
/// of first occurrence.
///
/// Queries are analyzed with the same analyzer as documents, so a query
/// made of a document's words always resolves to the same terms the
/// document was indexed under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Analyze `text` into a query.
    pub fn parse(analyzer: &dyn Analyzer, text: &str) -> Result<Self> {
        let mut seen = AHashSet::new();
        let terms = analyzer
            .terms(text.as_bytes())?
            .into_iter()
            .filter(|term| seen.insert(term.clone()))
            .collect();
        Ok(Query { terms })
    }

    /// Build a query from already-normalized terms, dropping duplicates.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = AHashSet::new();
        let terms = terms
            .into_iter()
            .map(Into::into)
            .filter(|term: &String| !term.is_empty() && seen.insert(term.clone()))
            .collect();
        Query { terms }
    }

    /// The unique query terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether the query has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
