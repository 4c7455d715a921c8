//! Query resolution: parsing, scoring, ranking and result serialization.

pub mod engine;
pub mod metrics;
pub mod query;
pub mod result;
pub mod scoring;

pub use engine::QueryEngine;
pub use metrics::{MetricsSnapshot, RecentSearch, SearchMetrics};
pub use query::Query;
pub use result::{SearchHit, SearchResults};
pub use scoring::{
    Bm25Params, Bm25ScoringFunction, CollectionStats, FrequencyScoringFunction,
    ScoringFunction, ScoringKind, TfIdfScoringFunction,
};
