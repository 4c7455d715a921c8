//! Case folding.
//!
//! Makes `Quick`, `QUICK` and `quick` the same term.
//!
//! ```
//! use fabric::analysis::token::Token;
//! use fabric::analysis::token_filter::{Filter, LowercaseFilter};
//!
//! let input = vec![Token::new("Brown"), Token::new("FOX")];
//! let folded: Vec<String> = LowercaseFilter::new()
//!     .filter(Box::new(input.into_iter()))
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//! assert_eq!(folded, ["brown", "fox"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercases token text. Stopped tokens pass through untouched.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

fn fold(token: Token) -> Token {
    if token.is_stopped() {
        return token;
    }
    if token.text.is_ascii() {
        if !token.text.bytes().any(|b| b.is_ascii_uppercase()) {
            return token;
        }
        let folded = token.text.to_ascii_lowercase();
        return token.with_text(folded);
    }
    let folded = token.text.to_lowercase();
    token.with_text(folded)
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(fold)))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
