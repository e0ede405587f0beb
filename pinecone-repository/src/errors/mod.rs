//! Error types for the Pinecone repository.
//!
//! Backend calls fail with [`VectorIndexError`]. The provisioner wraps those
//! into a [`ProvisionError`] naming the stage that failed, and environment
//! loading fails with [`ConfigError`].

mod config_error;
mod provision_error;
mod vector_index_error;

pub use config_error::ConfigError;
pub use provision_error::{ProvisionError, ProvisionErrorKind};
pub use vector_index_error::VectorIndexError;
