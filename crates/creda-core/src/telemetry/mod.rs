//! In-process telemetry for agent operations
//!
//! Records latency samples, cache hits and misses, and errors for the
//! operations the agent performs (tool calls, upstream API requests), and
//! derives an aggregate summary on demand. Recording never fails: the log
//! line each call emits is a side channel, not part of the data model.
//!
//! One [`MetricsStore`] per process is the expected setup. Construct it at
//! startup (see [`create_metrics_store`]) and hand clones of the shared
//! handle to everything that records. Keeping construction explicit means
//! tests get their own isolated stores for free.

pub mod event;
pub mod store;
pub mod tracker;

pub use event::{CacheEvent, ErrorEvent, LatencySample, MetricsSummary};
pub use store::{MetricsStore, SharedMetricsStore, create_metrics_store};
pub use tracker::{LatencyTimer, track, track_sync};
