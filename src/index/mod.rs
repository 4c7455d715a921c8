//! In-memory inverted index.
//!
//! Maps every term to the documents containing it, together with the
//! number of times the term occurs in each document.

pub mod inverted;
pub mod posting;

pub use inverted::{IndexStats, InvertedIndex};
pub use posting::{Posting, PostingIter, PostingList};
