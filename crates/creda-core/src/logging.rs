//! Logging bootstrap
//!
//! Telemetry emits through the `tracing` macros at its call sites; this
//! module only installs a subscriber that renders them as timestamped,
//! severity-tagged lines on stderr. Library consumers that install their
//! own subscriber can skip this entirely.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Calling this
/// more than once (or after a consumer installed its own subscriber) is
/// harmless: later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
