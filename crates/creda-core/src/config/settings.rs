//! Settings struct and defaults

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration settings for the application.
///
/// Defaults cover everything except the API keys, which only
/// [`Settings::from_env`](Settings::from_env) enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // API keys
    pub anthropic_api_key: String,
    pub fred_api_key: String,
    pub alpha_vantage_api_key: Option<String>,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    // Agent behaviour
    pub max_iterations: u32,
    pub cache_ttl_hours: u64,
    pub enable_caching: bool,

    // LLM parameters
    pub model_name: String,
    pub max_tokens: u32,
    pub temperature: f32,

    // Upstream API rate limits
    /// FRED requests per minute
    pub fred_rate_limit: u32,
    /// Yahoo Finance requests per hour
    pub yahoo_rate_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            fred_api_key: String::new(),
            alpha_vantage_api_key: None,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_database: "credit_agent".to_string(),
            max_iterations: 10,
            cache_ttl_hours: 1,
            enable_caching: true,
            model_name: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4096,
            temperature: 0.0,
            fred_rate_limit: 120,
            yahoo_rate_limit: 2000,
        }
    }
}

impl Settings {
    /// Cache entry time-to-live as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 3600)
    }
}
