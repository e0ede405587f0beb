//! Pinecone Bootstrap Entry Point
//!
//! Loads the environment, makes sure the configured index exists and exits.

use dotenv::dotenv;
use pinecone_bootstrap::telemetry::{init_tracing, LogFormat};
use pinecone_bootstrap::{run, BootstrapError};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), BootstrapError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing(LogFormat::from_env())?;

    info!("Starting Pinecone bootstrap");

    match run().await {
        Ok(indexes) => {
            info!(count = indexes.len(), "Pinecone bootstrap completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Pinecone bootstrap failed");
            Err(e)
        }
    }
}
