//! # Fabric
//!
//! An embeddable text indexing and search core with a four-call C ABI.
//!
//! ## Features
//!
//! - Unicode-aware analysis shared by indexing and querying
//! - Incremental in-memory inverted index with whole-document replacement
//! - Frequency, TF-IDF and BM25 scoring with deterministic ranking
//! - Single-writer / multi-reader concurrency
//! - Caller-owned result buffers with explicit release
//!
//! ## Example
//!
//! ```
//! use fabric::Engine;
//!
//! let engine = Engine::default();
//! engine.init().unwrap();
//! engine.index("doc1", b"alpha").unwrap();
//! engine.index("doc1", b"beta").unwrap();
//!
//! assert!(engine.search("alpha").unwrap().is_empty());
//! assert_eq!(engine.search("beta").unwrap().keys(), vec!["doc1"]);
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod index;
pub mod search;

pub use engine::{Engine, EngineConfig, EngineStats, ResultHandle};
pub use error::{FabricError, Result};
pub use search::{SearchHit, SearchResults};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
