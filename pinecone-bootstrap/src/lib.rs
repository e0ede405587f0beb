//! # Pinecone Bootstrap
//!
//! Startup helper for applications backed by a Pinecone index. It provisions
//! the process-wide client (creating the configured index if needed) and
//! reports which indexes the credential can see.
//!
//! ## Modules
//!
//! - [`telemetry`]: Tracing subscriber setup

pub mod telemetry;

use pinecone_repository::{
    get_pinecone_client, ProvisionError, VectorIndexError, VectorIndexProvider,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while bootstrapping.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Tracing could not be initialized.
    #[error("Tracing error: {0}")]
    TracingError(String),

    /// The client could not be provisioned.
    #[error("Provisioning error: {0}")]
    ProvisionError(#[from] ProvisionError),

    /// A call on the provisioned client failed.
    #[error("Pinecone error: {0}")]
    ClientError(#[from] VectorIndexError),
}

impl BootstrapError {
    /// Create a tracing error.
    pub fn tracing(msg: impl Into<String>) -> Self {
        Self::TracingError(msg.into())
    }
}

/// Provision the client and return the names of the visible indexes.
pub async fn run() -> Result<Vec<String>, BootstrapError> {
    let client = get_pinecone_client().await?;
    info!("Pinecone client ready");

    let indexes = client.list_indexes().await?;
    let names: Vec<String> = indexes.names().into_iter().map(str::to_string).collect();

    info!(count = names.len(), indexes = ?names, "Visible indexes");
    Ok(names)
}
