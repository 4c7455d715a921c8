//! Posting lists.
//!
//! A posting links one term to one document and records how often the term
//! occurs there. Postings of a term are kept ordered by document key, so
//! lookups always yield documents in ascending key order.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

/// A single posting in a posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Term frequency in the document.
    pub frequency: u32,
}

impl Posting {
    /// Create a posting with the given frequency.
    pub fn with_frequency(frequency: u32) -> Self {
        Posting { frequency }
    }

    /// Get the term frequency.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

/// The postings of a single term, keyed by document key.
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    postings: BTreeMap<Arc<str>, Posting>,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        PostingList::default()
    }

    /// Set the posting for `key`, replacing any existing one.
    pub fn upsert(&mut self, key: Arc<str>, posting: Posting) {
        self.postings.insert(key, posting);
    }

    /// Remove the posting for `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Posting> {
        self.postings.remove(key)
    }

    /// Get the posting for `key`.
    pub fn get(&self, key: &str) -> Option<&Posting> {
        self.postings.get(key)
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self) -> usize {
        self.postings.len()
    }

    /// Get the length of the posting list.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterate postings in ascending key order.
    pub fn iter(&self) -> PostingIter<'_> {
        PostingIter {
            inner: Some(self.postings.iter()),
        }
    }
}

/// Iterator over `(key, posting)` pairs of one term, in ascending key order.
///
/// An unindexed term yields an empty iterator.
#[derive(Debug, Clone, Default)]
pub struct PostingIter<'a> {
    inner: Option<btree_map::Iter<'a, Arc<str>, Posting>>,
}

impl<'a> PostingIter<'a> {
    /// An iterator that yields nothing.
    pub fn empty() -> Self {
        PostingIter { inner: None }
    }
}

impl<'a> Iterator for PostingIter<'a> {
    type Item = (&'a str, Posting);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .as_mut()?
            .next()
            .map(|(key, posting)| (key.as_ref(), *posting))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(inner) => inner.size_hint(),
            None => (0, Some(0)),
        }
    }
}
