//! Scoped latency measurement around fallible work
//!
//! The guarantee callers rely on: one latency sample per invocation, taken
//! on every exit path. Failures are recorded before the latency sample for
//! the same invocation and then handed back untouched; the tracker never
//! swallows an error or retries.

use std::fmt;
use std::future::Future;
use std::mem;
use std::time::{Duration, Instant};

use super::store::MetricsStore;

/// Guard that records elapsed time when dropped.
///
/// Created by [`MetricsStore::start_timer`]. Dropping the guard appends a
/// latency sample for its operation, which makes the measurement survive
/// early returns, `?`, panic unwinding, and async cancellation alike.
#[derive(Debug)]
pub struct LatencyTimer<'a> {
    store: &'a MetricsStore,
    operation: String,
    start: Instant,
}

impl LatencyTimer<'_> {
    /// Elapsed time so far, without stopping the timer.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer now. Dropping `self` records the sample.
    pub fn stop(self) {}
}

impl Drop for LatencyTimer<'_> {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        let operation = mem::take(&mut self.operation);
        self.store.record_latency(operation, latency_ms);
    }
}

impl MetricsStore {
    /// Start timing `operation`; the returned guard records on drop.
    pub fn start_timer(&self, operation: impl Into<String>) -> LatencyTimer<'_> {
        LatencyTimer {
            store: self,
            operation: operation.into(),
            start: Instant::now(),
        }
    }
}

/// Run async `work`, recording its duration under `operation`.
///
/// On `Err` the failure is recorded as an error event, then returned to the
/// caller unchanged; the error event always lands before the invocation's
/// latency sample. The sample itself is recorded no matter how the scope
/// exits, including when the returned future is dropped before it
/// completes.
pub async fn track<F, T, E>(store: &MetricsStore, operation: &str, work: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let timer = store.start_timer(operation);
    let result = work.await;
    if let Err(err) = &result {
        store.record_error(operation, err);
    }
    timer.stop();
    result
}

/// Synchronous counterpart of [`track`] for blocking work.
pub fn track_sync<F, T, E>(store: &MetricsStore, operation: &str, work: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: fmt::Display,
{
    let timer = store.start_timer(operation);
    let result = work();
    if let Err(err) = &result {
        store.record_error(operation, err);
    }
    timer.stop();
    result
}
