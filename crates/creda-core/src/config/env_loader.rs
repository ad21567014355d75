//! Environment variable-based settings loading

use std::env;
use std::str::FromStr;

use super::settings::Settings;
use crate::error::{CredaError, CredaResult};

impl Settings {
    /// Load settings from the process environment.
    ///
    /// A `.env` file in the working directory is applied first without
    /// overriding variables that are already set. `ANTHROPIC_API_KEY` and
    /// `FRED_API_KEY` are required; every other variable falls back to its
    /// [`Default`] value when absent.
    pub fn from_env() -> CredaResult<Self> {
        dotenv::dotenv().ok();

        let mut settings = Settings {
            anthropic_api_key: require_var("ANTHROPIC_API_KEY")?,
            fred_api_key: require_var("FRED_API_KEY")?,
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            ..Settings::default()
        };

        if let Ok(uri) = env::var("MONGODB_URI") {
            settings.mongodb_uri = uri;
        }
        if let Ok(database) = env::var("MONGODB_DATABASE") {
            settings.mongodb_database = database;
        }

        if let Some(value) = parse_var("MAX_ITERATIONS")? {
            settings.max_iterations = value;
        }
        if let Some(value) = parse_var("CACHE_TTL_HOURS")? {
            settings.cache_ttl_hours = value;
        }
        if let Some(value) = parse_var("ENABLE_CACHING")? {
            settings.enable_caching = value;
        }

        if let Ok(model) = env::var("MODEL_NAME") {
            settings.model_name = model;
        }
        if let Some(value) = parse_var("MAX_TOKENS")? {
            settings.max_tokens = value;
        }
        if let Some(value) = parse_var("TEMPERATURE")? {
            settings.temperature = value;
        }

        if let Some(value) = parse_var("FRED_RATE_LIMIT")? {
            settings.fred_rate_limit = value;
        }
        if let Some(value) = parse_var("YAHOO_RATE_LIMIT")? {
            settings.yahoo_rate_limit = value;
        }

        Ok(settings)
    }
}

fn require_var(name: &str) -> CredaResult<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(CredaError::config(format!(
            "Missing required environment variable {}",
            name
        ))),
    }
}

fn parse_var<T: FromStr>(name: &str) -> CredaResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| CredaError::config(format!("Invalid {} value: {}", name, raw))),
        Err(_) => Ok(None),
    }
}
