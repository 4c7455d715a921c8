//! A stored document: raw content plus the terms derived from it.

use std::borrow::Cow;

use crate::error::{FabricError, Result};

/// A document as held by the [`DocumentStore`](crate::document::DocumentStore).
///
/// Documents are replaced as a whole on every `index` call; nothing mutates
/// a stored document in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredDocument {
    content: Vec<u8>,
    terms: Vec<String>,
}

impl StoredDocument {
    /// Create a document from already-analyzed content.
    pub fn new(content: Vec<u8>, terms: Vec<String>) -> Self {
        StoredDocument { content, terms }
    }

    /// Copy caller-owned bytes into a new document, reporting allocation
    /// failure instead of aborting.
    pub fn from_slice(content: &[u8], terms: Vec<String>) -> Result<Self> {
        let mut owned = Vec::new();
        owned.try_reserve_exact(content.len()).map_err(|e| {
            FabricError::resource_exhausted(format!(
                "cannot allocate {} bytes of document content: {e}",
                content.len()
            ))
        })?;
        owned.extend_from_slice(content);
        Ok(StoredDocument::new(owned, terms))
    }

    /// The raw bytes exactly as indexed.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The content decoded as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// The ordered sequence of normalized terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms in the document.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Consume the document, keeping only its terms.
    pub fn into_terms(self) -> Vec<String> {
        self.terms
    }
}
