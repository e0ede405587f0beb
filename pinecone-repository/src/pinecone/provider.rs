//! Pinecone provider implementation.
//!
//! This module provides the concrete implementation of `VectorIndexProvider`
//! using the Pinecone control-plane REST API over `reqwest`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use tracing::{debug, error, info};
use url::Url;

use crate::config::PineconeConfig;
use crate::errors::VectorIndexError;
use crate::interfaces::VectorIndexProvider;
use crate::types::{CreateIndexRequest, IndexList};

const API_KEY_HEADER: &str = "api-key";
const API_VERSION_HEADER: &str = "x-pinecone-api-version";

/// Pinecone provider implementation.
///
/// Holds the credential and an HTTP client. Building one performs no network
/// I/O; the first request is made by `list_indexes`.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use pinecone_repository::{PineconeConfig, PineconeProvider, VectorIndexProvider};
///
/// let config = PineconeConfig::new("pk-...", "documents", Duration::from_secs(60));
/// let provider = PineconeProvider::new(&config)?;
///
/// let existing = provider.list_indexes().await?;
/// println!("{:?}", existing.names());
/// ```
#[derive(Debug)]
pub struct PineconeProvider {
    client: Client,
    indexes_url: Url,
}

impl PineconeProvider {
    /// Create a new provider for the configured control plane.
    ///
    /// # Returns
    ///
    /// * `Ok(PineconeProvider)` - A new provider instance
    /// * `Err(VectorIndexError)` - If the URL or API key cannot be used
    pub fn new(config: &PineconeConfig) -> Result<Self, VectorIndexError> {
        let base = Url::parse(&config.controller_url)
            .map_err(|e| VectorIndexError::config(format!("Invalid controller URL: {}", e)))?;
        let indexes_url = base
            .join("indexes")
            .map_err(|e| VectorIndexError::config(format!("Invalid controller URL: {}", e)))?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| VectorIndexError::config("API key is not a valid header value"))?;
        api_key.set_sensitive(true);
        let api_version = HeaderValue::from_str(&config.api_version)
            .map_err(|_| VectorIndexError::config("API version is not a valid header value"))?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(API_VERSION_HEADER, api_version);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| VectorIndexError::config(e.to_string()))?;

        info!(
            controller_url = %config.controller_url,
            api_version = %config.api_version,
            "Created Pinecone provider"
        );

        Ok(Self {
            client,
            indexes_url,
        })
    }

    /// Turn a non-success response into an API error carrying the body text.
    async fn check_status(response: Response) -> Result<Response, VectorIndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            body
        };

        Err(VectorIndexError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl VectorIndexProvider for PineconeProvider {
    async fn list_indexes(&self) -> Result<IndexList, VectorIndexError> {
        debug!(url = %self.indexes_url, "Listing indexes");

        let response = self
            .client
            .get(self.indexes_url.clone())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send list indexes request");
                VectorIndexError::from(e)
            })?;

        let response = Self::check_status(response).await?;
        let body = response.bytes().await?;

        serde_json::from_slice::<IndexList>(&body).map_err(|e| {
            error!(error = %e, "Failed to parse list indexes response");
            VectorIndexError::parse(e.to_string())
        })
    }

    async fn create_index(&self, request: &CreateIndexRequest) -> Result<(), VectorIndexError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| VectorIndexError::serialization(e.to_string()))?;

        debug!(
            name = %request.name,
            dimension = request.dimension,
            metric = ?request.metric,
            "Sending create index request"
        );

        let response = self
            .client
            .post(self.indexes_url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(name = %request.name, error = %e, "Failed to send create index request");
                VectorIndexError::from(e)
            })?;

        Self::check_status(response).await?;

        info!(name = %request.name, "Create index request accepted");
        Ok(())
    }
}
