//! Tokens flowing through the analysis pipeline.
//!
//! The tokenizer cuts text into [`Token`]s, filters rewrite or stop them,
//! and the texts of the tokens that survive are the terms a document is
//! indexed under (or a query is resolved with).
//!
//! # Examples
//!
//! ```
//! use fabric::analysis::token::Token;
//!
//! let token = Token::new("Fox").with_text("fox");
//! assert_eq!(token.text, "fox");
//! assert!(!token.is_stopped());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One word of analyzed text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Current text; filters may rewrite it.
    pub text: String,

    /// Set by a filter that wants the token dropped.
    pub stopped: bool,
}

impl Token {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            stopped: false,
        }
    }

    /// Length of the current text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark the token for removal.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Swap in new text, keeping the stopped flag.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Tokens passed from one pipeline stage to the next.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
