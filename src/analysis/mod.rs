//! Text analysis module for Fabric.
//!
//! Raw document bytes and query strings both go through the same analyzer,
//! so documents and queries always agree on what a term looks like.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
