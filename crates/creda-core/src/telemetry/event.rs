//! Event types recorded by the metrics store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single latency measurement for a named operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencySample {
    /// Operation label (e.g. a tool or upstream API name)
    pub operation: String,
    /// Wall-clock duration in milliseconds
    pub latency_ms: f64,
    /// When the sample was recorded
    pub timestamp: DateTime<Utc>,
}

/// A cache lookup, kept in either the hit or the miss stream.
///
/// The full query text is stored; only log output shortens it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEvent {
    /// Query text as the caller supplied it
    pub query: String,
    /// When the lookup was recorded
    pub timestamp: DateTime<Utc>,
}

/// A failed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Operation label the failure occurred under
    pub operation: String,
    /// Rendered error message
    pub error: String,
    /// When the failure was recorded
    pub timestamp: DateTime<Utc>,
}

/// Aggregate view over everything recorded so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Number of latency samples recorded
    pub total_queries: u64,
    /// Arithmetic mean over all latency samples; 0 when none exist
    pub average_latency_ms: f64,
    /// hits / (hits + misses), in [0, 1]; 0 when no lookups were recorded
    pub cache_hit_rate: f64,
    /// Number of error events recorded
    pub total_errors: u64,
}
