//! Vector index provider trait definition.

use async_trait::async_trait;

use crate::errors::VectorIndexError;
use crate::types::{CreateIndexRequest, IndexList};

/// Abstracts the control plane of the hosted vector index service.
///
/// Implementations are handed out by `ClientProvisioner`, which only needs the
/// two calls below to make sure the configured index exists. Tests inject mock
/// implementations through the provisioner's factory.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// List the indexes owned by this credential.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexList)` - The listed indexes, possibly empty
    /// * `Err(VectorIndexError)` - If the call failed or the body was malformed
    async fn list_indexes(&self) -> Result<IndexList, VectorIndexError>;

    /// Ask the service to create an index.
    ///
    /// Success only means the request was accepted. The index is provisioned
    /// asynchronously on the service side and may not be usable yet.
    ///
    /// # Arguments
    ///
    /// * `request` - Name, dimension, metric and deployment spec of the index
    async fn create_index(&self, request: &CreateIndexRequest) -> Result<(), VectorIndexError>;
}
