//! Provisioning error types.
//!
//! Each variant names the stage of client initialization that failed. The
//! display text is fixed per stage; the underlying cause stays reachable
//! through `std::error::Error::source` so callers can branch on it.

use thiserror::Error;

use crate::errors::VectorIndexError;

/// The stage at which provisioning failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionErrorKind {
    /// Listing the existing indexes failed.
    List,
    /// Creating the missing index failed.
    Create,
    /// Anything else, e.g. building the client from its configuration.
    Init,
}

/// Errors returned by `ClientProvisioner::get_client` and `get_pinecone_client`.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The remote listing call failed; nothing is known about the index.
    #[error("Failed to fetch existing indexes")]
    ListIndexes {
        #[source]
        source: VectorIndexError,
    },

    /// The remote create call failed; the index may exist in a partial state.
    #[error("Index creation failed")]
    CreateIndex {
        name: String,
        #[source]
        source: VectorIndexError,
    },

    /// Client construction or configuration failed.
    #[error("Failed to initialize Pinecone client")]
    Init {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProvisionError {
    /// Create a listing error.
    pub fn list_indexes(source: VectorIndexError) -> Self {
        Self::ListIndexes { source }
    }

    /// Create an index creation error.
    pub fn create_index(name: impl Into<String>, source: VectorIndexError) -> Self {
        Self::CreateIndex {
            name: name.into(),
            source,
        }
    }

    /// Create a generic initialization error.
    pub fn init(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Init {
            source: source.into(),
        }
    }

    /// The stage that failed.
    pub fn kind(&self) -> ProvisionErrorKind {
        match self {
            Self::ListIndexes { .. } => ProvisionErrorKind::List,
            Self::CreateIndex { .. } => ProvisionErrorKind::Create,
            Self::Init { .. } => ProvisionErrorKind::Init,
        }
    }

    /// The backend error behind a list or create failure.
    pub fn backend_error(&self) -> Option<&VectorIndexError> {
        match self {
            Self::ListIndexes { source } | Self::CreateIndex { source, .. } => Some(source),
            Self::Init { .. } => None,
        }
    }
}
