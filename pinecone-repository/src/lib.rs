//! # Pinecone Repository
//!
//! This crate provides the trait and implementation for talking to the hosted
//! vector index, and the provisioner that hands out a ready-to-use client.
//! It includes definitions for errors, configuration, the wire types and a
//! concrete implementation for Pinecone.
//!
//! The usual entry point is [`get_pinecone_client`], which builds the client
//! once per process and makes sure the configured index exists.

pub mod config;
pub mod errors;
pub mod global;
pub mod interfaces;
pub mod pinecone;
pub mod provisioner;
pub mod types;

pub use config::PineconeConfig;
pub use errors::{ConfigError, ProvisionError, ProvisionErrorKind, VectorIndexError};
pub use global::get_pinecone_client;
pub use interfaces::VectorIndexProvider;
pub use pinecone::PineconeProvider;
pub use provisioner::ClientProvisioner;
pub use types::{CreateIndexRequest, IndexList, IndexModel, IndexStatus, Metric};
