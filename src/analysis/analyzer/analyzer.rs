//! Core analyzer trait.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The same analyzer instance is used for document content and for query
/// strings, which is what guarantees that a query built from a document's
/// words finds that document.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze raw bytes into the ordered sequence of term texts.
    ///
    /// Bytes are decoded as UTF-8 with invalid sequences replaced, so binary
    /// content yields a partial or empty term list rather than an error.
    fn terms(&self, content: &[u8]) -> Result<Vec<String>> {
        let text = String::from_utf8_lossy(content);
        Ok(self.analyze(&text)?.map(|token| token.text).collect())
    }
}
