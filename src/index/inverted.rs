//! Term → document index, maintained incrementally.
//!
//! Every `index` call hands the index the old and new term sequences of one
//! document; [`InvertedIndex::update`] applies the multiset difference so the
//! postings always describe the current version of each document. The index
//! is not synchronized internally: the engine calls `update` only under its
//! write lock, which is what keeps readers from seeing half-applied changes.

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{FabricError, Result};
use crate::index::posting::{Posting, PostingIter, PostingList};

/// Statistics about an index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of documents known to the index, including term-less ones.
    pub doc_count: usize,

    /// Number of unique terms in the index.
    pub term_count: usize,

    /// Number of (term, document) postings.
    pub posting_count: usize,

    /// Sum of all document lengths, in terms.
    pub total_terms: u64,
}

/// In-memory inverted index.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// Term → postings. Terms with no postings are pruned.
    postings: AHashMap<String, PostingList>,

    /// Document key → number of terms in the current version.
    doc_lengths: AHashMap<Arc<str>, u32>,

    /// Sum of `doc_lengths`.
    total_terms: u64,
}

fn count_terms(terms: &[String]) -> AHashMap<&str, u32> {
    let mut counts: AHashMap<&str, u32> = AHashMap::with_capacity(terms.len());
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

fn doc_length(terms: &[String]) -> u32 {
    u32::try_from(terms.len()).unwrap_or(u32::MAX)
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Reserve room for indexing `new_terms` under `key`.
    ///
    /// Called before any mutation so that an allocation failure is reported
    /// while the index is still untouched.
    pub fn reserve(&mut self, key: &str, new_terms: &[String]) -> Result<()> {
        let unseen = count_terms(new_terms)
            .into_keys()
            .filter(|term| !self.postings.contains_key(*term))
            .count();
        self.postings.try_reserve(unseen).map_err(|e| {
            FabricError::resource_exhausted(format!("cannot grow term dictionary: {e}"))
        })?;
        if !self.doc_lengths.contains_key(key) {
            self.doc_lengths.try_reserve(1).map_err(|e| {
                FabricError::resource_exhausted(format!("cannot grow document table: {e}"))
            })?;
        }
        Ok(())
    }

    /// Replace the postings of `key`: `old_terms` is the term sequence that
    /// was indexed for it before (empty for a new key), `new_terms` the one
    /// that replaces it.
    ///
    /// Terms only in `old_terms` lose their posting for `key`; every term in
    /// `new_terms` gets a posting whose frequency is its count in
    /// `new_terms`.
    pub fn update(&mut self, key: &str, old_terms: &[String], new_terms: &[String]) {
        let old_counts = count_terms(old_terms);
        let new_counts = count_terms(new_terms);

        let shared_key = self.intern_key(key);

        for term in old_counts.keys() {
            if new_counts.contains_key(term) {
                continue;
            }
            if let Some(list) = self.postings.get_mut(*term) {
                list.remove(key);
                if list.is_empty() {
                    self.postings.remove(*term);
                }
            }
        }

        for (term, frequency) in new_counts {
            if old_counts.get(term) == Some(&frequency) && self.postings.contains_key(term) {
                continue;
            }
            self.postings
                .entry(term.to_string())
                .or_default()
                .upsert(Arc::clone(&shared_key), Posting::with_frequency(frequency));
        }

        let length = doc_length(new_terms);
        if let Some(previous) = self.doc_lengths.insert(shared_key, length) {
            self.total_terms -= u64::from(previous);
        }
        self.total_terms += u64::from(length);
    }

    /// Reuse the key allocation already shared by this document's postings.
    fn intern_key(&self, key: &str) -> Arc<str> {
        match self.doc_lengths.get_key_value(key) {
            Some((existing, _)) => Arc::clone(existing),
            None => Arc::from(key),
        }
    }

    /// Current postings for `term`, in ascending key order.
    pub fn lookup(&self, term: &str) -> PostingIter<'_> {
        match self.postings.get(term) {
            Some(list) => list.iter(),
            None => PostingIter::empty(),
        }
    }

    /// Frequency of `term` in the document stored under `key`.
    pub fn term_frequency(&self, term: &str, key: &str) -> u32 {
        self.postings
            .get(term)
            .and_then(|list| list.get(key))
            .map_or(0, Posting::frequency)
    }

    /// Number of documents containing `term`.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, PostingList::doc_frequency)
    }

    /// Number of documents known to the index.
    pub fn doc_count(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Number of terms in the document stored under `key`.
    pub fn doc_length(&self, key: &str) -> Option<u32> {
        self.doc_lengths.get(key).copied()
    }

    /// Average document length in terms; 0 for an empty index.
    pub fn avg_doc_length(&self) -> f32 {
        if self.doc_lengths.is_empty() {
            0.0
        } else {
            self.total_terms as f32 / self.doc_lengths.len() as f32
        }
    }

    /// Number of unique terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Check whether `term` has any postings.
    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Snapshot of index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            doc_count: self.doc_count(),
            term_count: self.term_count(),
            posting_count: self.postings.values().map(PostingList::len).sum(),
            total_terms: self.total_terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn keys_for(index: &InvertedIndex, term: &str) -> Vec<String> {
        index.lookup(term).map(|(key, _)| key.to_string()).collect()
    }

    #[test]
    fn test_new_document() {
        let mut index = InvertedIndex::new();
        index.update("doc1", &[], &terms("the quick brown fox the"));

        assert_eq!(index.term_frequency("the", "doc1"), 2);
        assert_eq!(index.term_frequency("fox", "doc1"), 1);
        assert_eq!(index.doc_count(), 1);
        assert_eq!(index.doc_length("doc1"), Some(5));
        assert_eq!(index.term_count(), 4);
    }

    #[test]
    fn test_replace_removes_stale_postings() {
        let mut index = InvertedIndex::new();
        let old = terms("alpha shared shared");
        index.update("doc1", &[], &old);
        index.update("doc1", &old, &terms("beta shared"));

        assert!(keys_for(&index, "alpha").is_empty());
        assert!(!index.contains_term("alpha"));
        assert_eq!(keys_for(&index, "beta"), vec!["doc1"]);
        assert_eq!(index.term_frequency("shared", "doc1"), 1);
        assert_eq!(index.doc_count(), 1);
        assert_eq!(index.stats().total_terms, 2);
    }

    #[test]
    fn test_replace_keeps_other_documents() {
        let mut index = InvertedIndex::new();
        index.update("doc1", &[], &terms("alpha"));
        index.update("doc2", &[], &terms("alpha beta"));
        index.update("doc1", &terms("alpha"), &terms("gamma"));

        assert_eq!(keys_for(&index, "alpha"), vec!["doc2"]);
        assert_eq!(index.doc_frequency("alpha"), 1);
        assert_eq!(keys_for(&index, "gamma"), vec!["doc1"]);
    }

    #[test]
    fn test_replace_with_empty_content() {
        let mut index = InvertedIndex::new();
        index.update("doc1", &[], &terms("alpha beta"));
        index.update("doc1", &terms("alpha beta"), &[]);

        assert_eq!(index.term_count(), 0);
        assert_eq!(index.doc_count(), 1);
        assert_eq!(index.doc_length("doc1"), Some(0));
        assert_eq!(index.avg_doc_length(), 0.0);
    }

    #[test]
    fn test_lookup_orders_by_key_and_unknown_is_empty() {
        let mut index = InvertedIndex::new();
        index.update("b", &[], &terms("x"));
        index.update("a", &[], &terms("x x"));

        let postings: Vec<(&str, u32)> = index
            .lookup("x")
            .map(|(key, posting)| (key, posting.frequency))
            .collect();
        assert_eq!(postings, vec![("a", 2), ("b", 1)]);
        assert_eq!(index.lookup("missing").count(), 0);
    }

    #[test]
    fn test_avg_doc_length_and_stats() {
        let mut index = InvertedIndex::new();
        assert_eq!(index.avg_doc_length(), 0.0);

        index.update("doc1", &[], &terms("a b c d"));
        index.update("doc2", &[], &terms("a b"));
        index.reserve("doc3", &terms("e")).unwrap();

        assert_eq!(index.avg_doc_length(), 3.0);
        let stats = index.stats();
        assert_eq!(stats.doc_count, 2);
        assert_eq!(stats.term_count, 4);
        assert_eq!(stats.posting_count, 6);
        assert_eq!(stats.total_terms, 6);
    }
}
