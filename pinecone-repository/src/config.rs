//! Configuration for the Pinecone client.

use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

/// Default control-plane URL.
pub const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";

/// Default value of the `X-Pinecone-API-Version` header.
pub const DEFAULT_API_VERSION: &str = "2024-07";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "PINECONE_API_KEY";

/// Environment variable holding the index name.
pub const INDEX_NAME_VAR: &str = "PINECONE_INDEX_NAME";

/// Environment variable holding the post-creation wait, in seconds.
pub const INIT_TIMEOUT_VAR: &str = "INDEX_INIT_TIMEOUT";

/// Optional override of the control-plane URL.
pub const CONTROLLER_URL_VAR: &str = "PINECONE_CONTROLLER_URL";

/// Optional override of the API version header.
pub const API_VERSION_VAR: &str = "PINECONE_API_VERSION";

/// Configuration for the Pinecone client.
///
/// Read once at startup and never changed afterwards.
#[derive(Clone)]
pub struct PineconeConfig {
    /// Credential sent with every request.
    pub api_key: String,
    /// Name of the index that must exist before the client is handed out.
    pub index_name: String,
    /// How long to wait after a create request before using the index.
    pub init_timeout: Duration,
    /// Base URL of the control plane.
    pub controller_url: String,
    /// API version header value.
    pub api_version: String,
}

impl std::fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("init_timeout", &self.init_timeout)
            .field("controller_url", &self.controller_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl PineconeConfig {
    /// Create a configuration with the default controller URL and API version.
    pub fn new(
        api_key: impl Into<String>,
        index_name: impl Into<String>,
        init_timeout: Duration,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            index_name: index_name.into(),
            init_timeout,
            controller_url: DEFAULT_CONTROLLER_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Point the client at a different control plane (e.g. a local stub).
    pub fn with_controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = url.into();
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `PINECONE_API_KEY`: API key (required)
    /// - `PINECONE_INDEX_NAME`: Index name (required)
    /// - `INDEX_INIT_TIMEOUT`: Seconds to wait after creating the index (required)
    /// - `PINECONE_CONTROLLER_URL`: Control-plane URL (default: https://api.pinecone.io)
    /// - `PINECONE_API_VERSION`: API version header (default: 2024-07)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let require = |var: &str| get(var).ok_or_else(|| ConfigError::missing(var));

        let api_key = require(API_KEY_VAR)?;
        let index_name = require(INDEX_NAME_VAR)?;
        let init_timeout = parse_timeout(&require(INIT_TIMEOUT_VAR)?)?;

        let controller_url =
            get(CONTROLLER_URL_VAR).unwrap_or_else(|| DEFAULT_CONTROLLER_URL.to_string());
        Url::parse(&controller_url)
            .map_err(|e| ConfigError::invalid(CONTROLLER_URL_VAR, &controller_url, e.to_string()))?;

        let api_version = get(API_VERSION_VAR).unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            api_key,
            index_name,
            init_timeout,
            controller_url,
            api_version,
        })
    }
}

/// Parse a non-negative number of seconds, integer or fractional.
fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let secs = value
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::invalid(INIT_TIMEOUT_VAR, value, e.to_string()))?;

    Duration::try_from_secs_f64(secs)
        .map_err(|e| ConfigError::invalid(INIT_TIMEOUT_VAR, value, e.to_string()))
}
