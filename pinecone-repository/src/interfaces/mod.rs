//! Interface definitions for the vector index provider.
//!
//! This module defines the abstract `VectorIndexProvider` trait that allows
//! for dependency injection and swappable backend implementations.

mod vector_index_provider;

pub use vector_index_provider::VectorIndexProvider;
