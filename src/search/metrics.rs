//! Search latency and volume metrics.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Default number of recent searches kept.
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// One entry of the recent-search window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    /// The query text as received.
    pub query: String,

    /// Time spent resolving the query.
    pub duration: Duration,

    /// When the search completed.
    pub timestamp: SystemTime,

    /// Number of matching documents.
    pub result_count: usize,
}

/// Point-in-time view of [`SearchMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Searches recorded since the engine was created.
    pub total_searches: u64,

    /// Mean search latency, if any search was recorded.
    pub average_search_time: Option<Duration>,

    /// Most recent searches, newest first.
    pub recent: Vec<RecentSearch>,
}

/// Thread-safe search counters plus a bounded window of recent searches.
#[derive(Debug)]
pub struct SearchMetrics {
    total_searches: AtomicU64,
    total_search_micros: AtomicU64,
    window_size: usize,
    recent_searches: Mutex<VecDeque<RecentSearch>>,
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl SearchMetrics {
    /// Create metrics keeping at most `window_size` recent searches.
    pub fn new(window_size: usize) -> Self {
        SearchMetrics {
            total_searches: AtomicU64::new(0),
            total_search_micros: AtomicU64::new(0),
            window_size,
            recent_searches: Mutex::new(VecDeque::with_capacity(window_size)),
        }
    }

    /// Record a completed search. Returns the new total search count.
    pub fn record_search(&self, query: &str, duration: Duration, result_count: usize) -> u64 {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.total_search_micros.fetch_add(micros, Ordering::Relaxed);
        let total = self.total_searches.fetch_add(1, Ordering::Relaxed) + 1;

        if self.window_size > 0 {
            let mut recent = self.recent_searches.lock();
            if recent.len() >= self.window_size {
                recent.pop_front();
            }
            recent.push_back(RecentSearch {
                query: query.to_string(),
                duration,
                timestamp: SystemTime::now(),
                result_count,
            });
        }

        total
    }

    /// Searches recorded so far.
    pub fn total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Mean search latency, or `None` before the first search.
    pub fn average_search_time(&self) -> Option<Duration> {
        let total = self.total_searches.load(Ordering::Relaxed);
        if total == 0 {
            return None;
        }
        let micros = self.total_search_micros.load(Ordering::Relaxed);
        Some(Duration::from_micros(micros / total))
    }

    /// Up to `limit` recent searches, newest first.
    pub fn recent_searches(&self, limit: usize) -> Vec<RecentSearch> {
        let recent = self.recent_searches.lock();
        recent.iter().rev().take(limit).cloned().collect()
    }

    /// Capture all counters and the full recent window.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_searches: self.total_searches(),
            average_search_time: self.average_search_time(),
            recent: self.recent_searches(self.window_size),
        }
    }
}
