//! Configuration error types.

use thiserror::Error;

/// Errors raised while reading the client configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variable {0}")]
    Missing(String),

    /// A variable is set but its value cannot be used.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    /// Create a missing-variable error.
    pub fn missing(var: impl Into<String>) -> Self {
        Self::Missing(var.into())
    }

    /// Create an invalid-value error.
    pub fn invalid(
        var: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            var: var.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
