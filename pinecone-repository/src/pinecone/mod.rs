//! Pinecone implementation of the vector index provider.
//!
//! This module provides a concrete implementation of `VectorIndexProvider`
//! that talks to the Pinecone control-plane REST API.

mod index_config;
mod provider;

pub use index_config::{index_request, INDEX_DIMENSION, INDEX_METRIC};
pub use provider::PineconeProvider;
