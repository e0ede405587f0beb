//! Fixed parameters of the provisioned index.
//!
//! The width matches the output of the embedding model used by the
//! application. Changing the model means changing these constants.

use crate::types::{CreateIndexRequest, Metric};

/// Vector width of the provisioned index.
pub const INDEX_DIMENSION: u32 = 1536;

/// Similarity metric of the provisioned index.
pub const INDEX_METRIC: Metric = Metric::Cosine;

/// Build the create request for an index with the fixed parameters.
///
/// No deployment spec is sent.
pub fn index_request(name: impl Into<String>) -> CreateIndexRequest {
    CreateIndexRequest {
        name: name.into(),
        dimension: INDEX_DIMENSION,
        metric: INDEX_METRIC,
        spec: None,
    }
}
