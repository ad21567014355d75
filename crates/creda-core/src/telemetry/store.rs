//! Append-only metrics store

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{error, info};

use super::event::{CacheEvent, ErrorEvent, LatencySample, MetricsSummary};

/// Characters of query text shown in log lines. Storage keeps the full text.
const QUERY_PREVIEW_CHARS: usize = 50;

/// In-memory accumulator for operation latency, cache effectiveness, and
/// errors.
///
/// Each event stream is append-only and guarded by its own lock, so
/// concurrent recorders never lose events or tear a single event across
/// writers; within a stream, events stay in recording order. Recording
/// methods are infallible and do no I/O beyond emitting a log line.
///
/// Streams grow without bound by default; the store holds every event
/// until the process exits. Use [`MetricsStore::with_retention`] to cap
/// each stream instead.
#[derive(Debug, Default)]
pub struct MetricsStore {
    latencies: RwLock<Vec<LatencySample>>,
    cache_hits: RwLock<Vec<CacheEvent>>,
    cache_misses: RwLock<Vec<CacheEvent>>,
    errors: RwLock<Vec<ErrorEvent>>,
    retention: Option<NonZeroUsize>,
}

impl MetricsStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that keeps at most `max_events_per_stream` events in
    /// each stream, evicting the oldest first.
    ///
    /// Summary figures are computed over the retained events only.
    pub fn with_retention(max_events_per_stream: NonZeroUsize) -> Self {
        Self {
            retention: Some(max_events_per_stream),
            ..Self::default()
        }
    }

    /// Record how long `operation` took, in milliseconds.
    ///
    /// The value is stored as given; range checks are the caller's concern.
    pub fn record_latency(&self, operation: impl Into<String>, latency_ms: f64) {
        let operation = operation.into();
        info!("Recorded latency for {}: {:.2} ms", operation, latency_ms);
        self.append(&self.latencies, |timestamp| LatencySample {
            operation,
            latency_ms,
            timestamp,
        });
    }

    /// Record a cache hit for `query`.
    pub fn record_cache_hit(&self, query: impl Into<String>) {
        let query = query.into();
        info!("Cache hit for query: {}...", query_preview(&query));
        self.append(&self.cache_hits, |timestamp| CacheEvent { query, timestamp });
    }

    /// Record a cache miss for `query`.
    pub fn record_cache_miss(&self, query: impl Into<String>) {
        let query = query.into();
        info!("Cache miss for query: {}...", query_preview(&query));
        self.append(&self.cache_misses, |timestamp| CacheEvent { query, timestamp });
    }

    /// Record a failure of `operation`.
    ///
    /// Accepts anything displayable and stores its rendered message.
    /// Recording itself cannot fail.
    pub fn record_error(&self, operation: impl Into<String>, err: impl fmt::Display) {
        let operation = operation.into();
        let error = err.to_string();
        error!("Error in {}: {}", operation, error);
        self.append(&self.errors, |timestamp| ErrorEvent {
            operation,
            error,
            timestamp,
        });
    }

    /// Compute the aggregate summary over everything recorded so far.
    ///
    /// Pure read; an empty store yields all zeros.
    pub fn summary(&self) -> MetricsSummary {
        let latencies = self.latencies.read();
        let total_queries = latencies.len() as u64;
        let average_latency_ms = if latencies.is_empty() {
            0.0
        } else {
            latencies.iter().map(|s| s.latency_ms).sum::<f64>() / latencies.len() as f64
        };
        drop(latencies);

        let hits = self.cache_hits.read().len() as u64;
        let misses = self.cache_misses.read().len() as u64;
        let lookups = hits + misses;
        let cache_hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };

        MetricsSummary {
            total_queries,
            average_latency_ms,
            cache_hit_rate,
            total_errors: self.errors.read().len() as u64,
        }
    }

    /// All latency samples recorded so far, oldest first.
    pub fn latency_samples(&self) -> Vec<LatencySample> {
        self.latencies.read().clone()
    }

    /// All cache hits recorded so far, oldest first.
    pub fn cache_hits(&self) -> Vec<CacheEvent> {
        self.cache_hits.read().clone()
    }

    /// All cache misses recorded so far, oldest first.
    pub fn cache_misses(&self) -> Vec<CacheEvent> {
        self.cache_misses.read().clone()
    }

    /// All error events recorded so far, oldest first.
    pub fn errors(&self) -> Vec<ErrorEvent> {
        self.errors.read().clone()
    }

    // Timestamp capture happens under the stream's write lock so event
    // order and timestamp order cannot disagree within a stream.
    fn append<T>(&self, stream: &RwLock<Vec<T>>, build: impl FnOnce(DateTime<Utc>) -> T) {
        let mut events = stream.write();
        if let Some(cap) = self.retention {
            while events.len() >= cap.get() {
                events.remove(0);
            }
        }
        events.push(build(Utc::now()));
    }
}

fn query_preview(query: &str) -> &str {
    match query.char_indices().nth(QUERY_PREVIEW_CHARS) {
        Some((end, _)) => &query[..end],
        None => query,
    }
}

/// Thread-safe shared handle to the process-wide store.
pub type SharedMetricsStore = Arc<MetricsStore>;

/// Create an unbounded store ready to share across tasks and threads.
pub fn create_metrics_store() -> SharedMetricsStore {
    Arc::new(MetricsStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_store_summary_is_zeroed() {
        let store = MetricsStore::new();
        let summary = store.summary();

        assert_eq!(summary.total_queries, 0);
        assert_eq!(summary.average_latency_ms, 0.0);
        assert_eq!(summary.cache_hit_rate, 0.0);
        assert_eq!(summary.total_errors, 0);
    }

    #[test]
    fn summary_averages_latency_samples() {
        let store = MetricsStore::new();
        store.record_latency("fetch_price", 120.5);
        store.record_latency("fetch_price", 80.0);

        let summary = store.summary();
        assert_eq!(summary.total_queries, 2);
        assert!((summary.average_latency_ms - 100.25).abs() < 1e-9);
    }

    #[test]
    fn summary_reflects_mean_of_many_samples() {
        let store = MetricsStore::new();
        let values = [3.0, 14.0, 15.0, 92.0, 65.0, 35.0];
        for v in values {
            store.record_latency("series", v);
        }

        let summary = store.summary();
        let expected = values.iter().sum::<f64>() / values.len() as f64;
        assert_eq!(summary.total_queries, values.len() as u64);
        assert!((summary.average_latency_ms - expected).abs() < 1e-9);
    }

    #[test]
    fn cache_hit_rate_is_hits_over_lookups() {
        let store = MetricsStore::new();
        store.record_cache_hit("10y treasury yield");
        store.record_cache_hit("10y treasury yield");
        store.record_cache_hit("cpi yoy");
        store.record_cache_miss("fed funds futures");

        assert!((store.summary().cache_hit_rate - 0.75).abs() < 1e-9);
    }

    #[test]
    fn negative_latency_is_stored_as_given() {
        let store = MetricsStore::new();
        store.record_latency("clock_skew", -5.0);

        let summary = store.summary();
        assert_eq!(summary.total_queries, 1);
        assert_eq!(summary.average_latency_ms, -5.0);
    }

    #[test]
    fn errors_do_not_count_as_queries() {
        let store = MetricsStore::new();
        store.record_error("fetch_filing", "connection reset");

        let summary = store.summary();
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_queries, 0);

        let errors = store.errors();
        assert_eq!(errors[0].operation, "fetch_filing");
        assert_eq!(errors[0].error, "connection reset");
    }

    #[test]
    fn long_query_text_is_stored_in_full() {
        let store = MetricsStore::new();
        let query = "what is the spread between BBB corporate bonds and the 10 year treasury, \
                     monthly, since 2008, seasonally adjusted";
        store.record_cache_miss(query);

        let misses = store.cache_misses();
        assert_eq!(misses.len(), 1);
        assert_eq!(misses[0].query, query);
        assert!(misses[0].query.chars().count() > QUERY_PREVIEW_CHARS);
    }

    #[test]
    fn query_preview_respects_char_boundaries() {
        let query = "долгосрочная ставка по ипотеке в россии с 2008 года по регионам";
        let preview = query_preview(query);
        assert_eq!(preview.chars().count(), QUERY_PREVIEW_CHARS);
        assert!(query.starts_with(preview));

        assert_eq!(query_preview("short"), "short");
    }

    #[test]
    fn summary_is_stable_without_new_recordings() {
        let store = MetricsStore::new();
        store.record_latency("fetch_price", 12.0);
        store.record_cache_hit("q");
        store.record_error("lookup", "timeout");

        assert_eq!(store.summary(), store.summary());
    }

    #[test]
    fn summary_serializes_with_exactly_four_keys() {
        let store = MetricsStore::new();
        store.record_latency("fetch_price", 10.0);

        let value = serde_json::to_value(store.summary()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in [
            "total_queries",
            "average_latency_ms",
            "cache_hit_rate",
            "total_errors",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn streams_preserve_recording_order() {
        let store = MetricsStore::new();
        for i in 0..10 {
            store.record_latency(format!("op-{}", i), i as f64);
        }

        let samples = store.latency_samples();
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.operation, format!("op-{}", i));
        }
        for pair in samples.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn concurrent_recording_loses_no_events() {
        let store = create_metrics_store();
        let mut handles = Vec::new();
        for t in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    store.record_latency(format!("op-{}", t), i as f64);
                    store.record_cache_hit("shared query");
                    if i % 10 == 0 {
                        store.record_error(format!("op-{}", t), "upstream 503");
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let summary = store.summary();
        assert_eq!(summary.total_queries, 800);
        assert_eq!(store.cache_hits().len(), 800);
        assert_eq!(summary.total_errors, 80);
    }

    #[test]
    fn retention_evicts_oldest_events_first() {
        let cap = NonZeroUsize::new(2).unwrap();
        let store = MetricsStore::with_retention(cap);
        store.record_latency("first", 1.0);
        store.record_latency("second", 2.0);
        store.record_latency("third", 3.0);

        let samples = store.latency_samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].operation, "second");
        assert_eq!(samples[1].operation, "third");

        // summary is computed over the retained window
        assert_eq!(store.summary().total_queries, 2);
        assert!((store.summary().average_latency_ms - 2.5).abs() < 1e-9);
    }

    #[test]
    fn unbounded_store_keeps_everything() {
        let store = MetricsStore::new();
        for i in 0..1_000 {
            store.record_latency("bulk", i as f64);
        }
        assert_eq!(store.summary().total_queries, 1_000);
    }
}
