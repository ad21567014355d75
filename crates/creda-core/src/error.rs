//! Error types for the Creda core crate

use thiserror::Error;

/// Result type alias for Creda operations
pub type CredaResult<T> = Result<T, CredaError>;

/// Main error type for the Creda core crate.
///
/// Telemetry recording is infallible by contract and never produces one of
/// these; the variants here cover the configuration surface.
#[derive(Error, Debug, Clone)]
pub enum CredaError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CredaError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = CredaError::config("Invalid MAX_TOKENS value");
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid MAX_TOKENS value"
        );
    }
}
