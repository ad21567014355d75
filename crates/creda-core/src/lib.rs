//! Creda Agent Core Library
//!
//! This crate provides the shared plumbing for the Creda credit-research
//! agent: in-process telemetry (operation latency, cache effectiveness,
//! errors) and application settings loaded from the environment.
//!
//! The agent itself (LLM client, MongoDB storage, data-source connectors)
//! lives in the consuming crates. They construct one [`MetricsStore`] at
//! startup, pass it to everything that records, and pull a
//! [`MetricsSummary`] whenever they want a rollup.

pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;

// Re-export commonly used types
pub use config::Settings;
pub use error::{CredaError, CredaResult};
pub use telemetry::{
    CacheEvent, ErrorEvent, LatencySample, LatencyTimer, MetricsStore, MetricsSummary,
    SharedMetricsStore, create_metrics_store, track, track_sync,
};
