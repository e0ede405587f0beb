//! Vector index error types.
//!
//! This module defines the error type returned by every `VectorIndexProvider`
//! operation, regardless of the backend behind it.

use thiserror::Error;

/// Errors from vector index backend operations.
///
/// Used by the `VectorIndexProvider` trait for all remote calls. The variants
/// separate transport failures from responses the service rejected and from
/// bodies that could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VectorIndexError {
    /// Failed to reach the service (DNS, TLS, connection reset, ...).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The client could not be built from the given configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl VectorIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an API error from a response status and body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// HTTP status of the failed call, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VectorIndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ParseError(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::ConnectionError(err.to_string())
        }
    }
}
