//! Boundary punctuation removal.

use super::Filter;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trims non-alphanumeric characters from both ends of each token.
///
/// Inner punctuation is kept (`don't` stays `don't`), boundary punctuation is
/// not (`_init_` becomes `init`). A token with nothing left is stopped.
#[derive(Clone, Debug, Default)]
pub struct StripFilter;

impl StripFilter {
    pub fn new() -> Self {
        StripFilter
    }
}

fn strip(token: Token) -> Token {
    if token.is_stopped() {
        return token;
    }
    let trimmed = token.text.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        token.stop()
    } else if trimmed.len() == token.text.len() {
        token
    } else {
        let trimmed = trimmed.to_string();
        token.with_text(trimmed)
    }
}

impl Filter for StripFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(strip)))
    }

    fn name(&self) -> &'static str {
        "strip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_boundaries() {
        let input = vec![
            Token::new("_init_"),
            Token::new("don't"),
            Token::new("___"),
        ];
        let out: Vec<Token> = StripFilter::new()
            .filter(Box::new(input.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(out[0].text, "init");
        assert_eq!(out[1].text, "don't");
        assert_eq!(out[2].text, "___");
        assert!(out[2].is_stopped());
    }
}
