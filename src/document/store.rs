//! Key → document mapping.
//!
//! The store is the canonical owner of every document's raw content and
//! term list. It is not synchronized on its own; the engine mutates it only
//! while holding its write lock, together with the inverted index.

use ahash::AHashMap;

use crate::document::document::StoredDocument;
use crate::error::{FabricError, Result};

/// Canonical association of keys to stored documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: AHashMap<String, StoredDocument>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        DocumentStore::default()
    }

    /// Make sure a `put` under `key` will not need to grow the map.
    ///
    /// Called before any mutation so that allocation failure leaves the
    /// store and the index in their pre-call state.
    pub fn reserve_for(&mut self, key: &str) -> Result<()> {
        if self.documents.contains_key(key) {
            return Ok(());
        }
        self.documents.try_reserve(1).map_err(|e| {
            FabricError::resource_exhausted(format!("cannot grow document store: {e}"))
        })
    }

    /// Store `document` under `key`, replacing any previous version.
    ///
    /// Returns the previous term sequence, or an empty one if the key is new.
    pub fn put(&mut self, key: &str, document: StoredDocument) -> Vec<String> {
        match self.documents.get_mut(key) {
            Some(existing) => std::mem::replace(existing, document).into_terms(),
            None => {
                self.documents.insert(key.to_string(), document);
                Vec::new()
            }
        }
    }

    /// Look up a document by key.
    pub fn get(&self, key: &str) -> Option<&StoredDocument> {
        self.documents.get(key)
    }

    /// Check whether a document is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Total size of stored content in bytes.
    pub fn content_bytes(&self) -> usize {
        self.documents.values().map(|doc| doc.content().len()).sum()
    }
}
