//! Process-wide Pinecone client.
//!
//! For applications that want a single client without wiring a
//! `ClientProvisioner` through their own state. The configuration is read
//! from the environment the first time a client is requested.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::error;

use crate::config::PineconeConfig;
use crate::errors::ProvisionError;
use crate::pinecone::PineconeProvider;
use crate::provisioner::ClientProvisioner;

static PROVISIONER: OnceCell<ClientProvisioner<PineconeProvider>> = OnceCell::const_new();

/// Return the process-wide Pinecone client, provisioning it on first use.
///
/// # Environment Variables
///
/// - `PINECONE_API_KEY`: API key (required)
/// - `PINECONE_INDEX_NAME`: Index that must exist (required)
/// - `INDEX_INIT_TIMEOUT`: Seconds to wait after creating the index (required)
///
/// # Returns
///
/// * `Ok(Arc<PineconeProvider>)` - The same client on every successful call
/// * `Err(ProvisionError)` - If configuration, listing or creation failed
pub async fn get_pinecone_client() -> Result<Arc<PineconeProvider>, ProvisionError> {
    let provisioner = PROVISIONER
        .get_or_try_init(|| async {
            PineconeConfig::from_env()
                .map(ClientProvisioner::pinecone)
                .map_err(|e| {
                    error!(error = %e, "Failed to read Pinecone configuration");
                    ProvisionError::init(e)
                })
        })
        .await?;

    provisioner.get_client().await
}
