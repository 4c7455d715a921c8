//! The engine: one document store and inverted index behind the
//! `init` / `index` / `search` / `free` contract.
//!
//! # Lifecycle
//!
//! An engine starts `Uninitialized`. [`Engine::init`] moves it to `Ready`;
//! calling it again while `Ready` is a no-op that succeeds and keeps all
//! indexed documents. `index` and `search` fail with
//! [`FabricError::NotInitialized`] before `init` and change nothing. There
//! is no explicit teardown: state lives until the engine is dropped.
//!
//! # Concurrency
//!
//! The store and the index sit behind one read-write lock. `index` analyzes
//! content before taking the write lock and then replaces the document and
//! its postings in one critical section; `search` holds the read lock only
//! while scoring. Concurrent searches therefore run in parallel and never
//! observe a document with a mix of old and new postings.
//!
//! # Examples
//!
//! ```
//! use fabric::engine::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! engine.init().unwrap();
//! engine.index("doc1", b"the quick brown fox").unwrap();
//! engine.index("doc2", b"the lazy dog").unwrap();
//!
//! let results = engine.search("quick dog").unwrap();
//! assert_eq!(results.keys(), vec!["doc1", "doc2"]);
//! ```

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::document::{DocumentStore, StoredDocument};
use crate::engine::config::EngineConfig;
use crate::engine::handle::{HandleRegistry, ResultHandle};
use crate::error::{FabricError, Result};
use crate::index::InvertedIndex;
use crate::search::engine::QueryEngine;
use crate::search::metrics::{MetricsSnapshot, SearchMetrics};
use crate::search::query::Query;
use crate::search::result::SearchResults;

/// Indexed state, present once the engine is `Ready`.
#[derive(Debug, Default)]
struct IndexState {
    store: DocumentStore,
    index: InvertedIndex,
}

#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Ready(IndexState),
}

/// Engine statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Number of stored documents.
    pub documents: usize,

    /// Number of unique terms.
    pub terms: usize,

    /// Number of (term, document) postings.
    pub postings: usize,

    /// Total bytes of stored content.
    pub content_bytes: usize,

    /// Result buffers issued and not yet released.
    pub outstanding_buffers: usize,
}

/// Embeddable text indexing and search engine.
pub struct Engine {
    config: EngineConfig,
    analyzer: Arc<dyn Analyzer>,
    query_engine: QueryEngine,
    state: RwLock<Lifecycle>,
    handles: HandleRegistry,
    metrics: SearchMetrics,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .field("ready", &self.is_ready())
            .field("outstanding_buffers", &self.handles.outstanding())
            .finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::build(EngineConfig::default(), Arc::new(StandardAnalyzer::new()))
    }
}

impl Engine {
    /// Create an uninitialized engine with the standard analyzer.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_analyzer(config, Arc::new(StandardAnalyzer::new()))
    }

    /// Create an uninitialized engine with a custom analyzer.
    ///
    /// The analyzer is used for both documents and queries.
    pub fn with_analyzer(config: EngineConfig, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, analyzer))
    }

    fn build(config: EngineConfig, analyzer: Arc<dyn Analyzer>) -> Self {
        Engine {
            query_engine: config.query_engine(),
            metrics: SearchMetrics::new(config.metrics_window),
            config,
            analyzer,
            state: RwLock::new(Lifecycle::Uninitialized),
            handles: HandleRegistry::new(),
        }
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Move the engine to `Ready`. A second call is a successful no-op.
    pub fn init(&self) -> Result<()> {
        let mut state = self.state.write();
        if matches!(*state, Lifecycle::Ready(_)) {
            debug!("init called on a ready engine; keeping existing state");
            return Ok(());
        }

        *state = Lifecycle::Ready(IndexState::default());
        debug!(
            analyzer = self.analyzer.name(),
            scoring = self.query_engine.scoring().name(),
            "engine initialized"
        );
        Ok(())
    }

    /// Whether `init` has succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), Lifecycle::Ready(_))
    }

    /// Index `content` under `key`, replacing any document already stored
    /// under that key.
    ///
    /// Either the whole replacement becomes visible or, on error, nothing
    /// changes.
    pub fn index(&self, key: &str, content: &[u8]) -> Result<()> {
        if !self.is_ready() {
            warn!(key, "index called before init");
            return Err(FabricError::NotInitialized);
        }
        if key.is_empty() {
            return Err(FabricError::invalid_argument("document key must not be empty"));
        }

        let start = Instant::now();
        let terms = self.analyzer.terms(content)?;
        let document = StoredDocument::from_slice(content, terms)?;

        let mut state = self.state.write();
        let Lifecycle::Ready(IndexState { store, index }) = &mut *state else {
            return Err(FabricError::NotInitialized);
        };

        store.reserve_for(key)?;
        index.reserve(key, document.terms())?;

        let replaced = store.contains(key);
        let old_terms = store.put(key, document);
        let new_terms = store.get(key).map(StoredDocument::terms).unwrap_or_default();
        index.update(key, &old_terms, new_terms);

        debug!(
            key,
            bytes = content.len(),
            terms = new_terms.len(),
            replaced,
            elapsed_us = start.elapsed().as_micros() as u64,
            "indexed document"
        );
        Ok(())
    }

    /// Run a free-text query and return the ranked hits.
    ///
    /// A query with no terms after analysis returns an empty result.
    pub fn search(&self, query: &str) -> Result<SearchResults> {
        let start = Instant::now();
        let parsed = Query::parse(self.analyzer.as_ref(), query)?;

        let results = {
            let state = self.state.read();
            let Lifecycle::Ready(IndexState { index, .. }) = &*state else {
                warn!(query, "search called before init");
                return Err(FabricError::NotInitialized);
            };
            self.query_engine.search(&parsed, index)
        };

        let elapsed = start.elapsed();
        self.metrics.record_search(query, elapsed, results.total);
        debug!(
            query,
            terms = parsed.terms().len(),
            total = results.total,
            returned = results.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "search completed"
        );
        Ok(results)
    }

    /// Run a query and hand the serialized result to the caller as an owned
    /// buffer.
    ///
    /// A buffer is issued for every successful search, including ones with
    /// zero hits, and must be released with [`Engine::free`] (or
    /// [`Engine::release_raw`] for handles that crossed the C ABI).
    pub fn search_handle(&self, query: &str) -> Result<ResultHandle> {
        let results = self.search(query)?;
        let text = results.to_json()?;
        self.handles.issue(text)
    }

    /// Copy out the text behind an outstanding handle.
    pub fn resolve(&self, handle: &ResultHandle) -> Option<String> {
        self.handles.resolve(handle)
    }

    /// Release a result buffer.
    pub fn free(&self, handle: ResultHandle) -> Result<()> {
        self.release_raw(handle.into_raw())
    }

    /// Release a result buffer by the id (address) the caller was given.
    ///
    /// Releasing an id that is not outstanding is a contract violation; it
    /// is logged and reported as [`FabricError::InvalidHandle`].
    pub fn release_raw(&self, id: usize) -> Result<()> {
        self.handles.release(id).inspect_err(|e| {
            error!(error = %e, "release of a result buffer that is not outstanding");
        })
    }

    /// The registry of outstanding result buffers.
    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }

    /// Raw content stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let state = self.state.read();
        let Lifecycle::Ready(IndexState { store, .. }) = &*state else {
            return Err(FabricError::NotInitialized);
        };
        Ok(store.get(key).map(|doc| doc.content().to_vec()))
    }

    /// Keys of all stored documents, in ascending order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let state = self.state.read();
        let Lifecycle::Ready(IndexState { store, .. }) = &*state else {
            return Err(FabricError::NotInitialized);
        };
        Ok(store.keys().into_iter().map(str::to_string).collect())
    }

    /// Current engine statistics.
    pub fn stats(&self) -> Result<EngineStats> {
        let state = self.state.read();
        let Lifecycle::Ready(IndexState { store, index }) = &*state else {
            return Err(FabricError::NotInitialized);
        };
        let index_stats = index.stats();
        Ok(EngineStats {
            documents: store.len(),
            terms: index_stats.term_count,
            postings: index_stats.posting_count,
            content_bytes: store.content_bytes(),
            outstanding_buffers: self.handles.outstanding(),
        })
    }

    /// Search metrics recorded so far.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
