//! Application settings for the Creda agent
//!
//! The telemetry core never reads these values itself. Callers load a
//! [`Settings`] once at startup and pass the pieces they need to their own
//! collaborators: cache TTL to the cache, rate limits to the connectors,
//! model parameters to the LLM client.

mod env_loader;
mod settings;

pub use settings::Settings;
