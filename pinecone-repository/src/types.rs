//! Request and response types for the index control plane.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Distance function used for nearest-neighbor comparisons within an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cosine,
    Euclidean,
    Dotproduct,
}

/// Readiness reported by the service for an index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexStatus {
    pub ready: bool,
    pub state: String,
}

/// Description of one index as returned by the listing call.
///
/// Only `name` is guaranteed; the other fields are kept when the service
/// sends them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexModel {
    /// The index name.
    pub name: String,
    /// Vector width.
    #[serde(default)]
    pub dimension: Option<u32>,
    /// Similarity metric.
    #[serde(default)]
    pub metric: Option<Metric>,
    /// Data-plane host for queries.
    #[serde(default)]
    pub host: Option<String>,
    /// Provisioning status.
    #[serde(default)]
    pub status: Option<IndexStatus>,
}

impl IndexModel {
    /// Create a description carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension: None,
            metric: None,
            host: None,
            status: None,
        }
    }
}

/// Response of the listing call.
///
/// A body without an `indexes` field (or with `null`) is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndexList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub indexes: Vec<IndexModel>,
}

impl IndexList {
    /// Build a list from index names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            indexes: names.into_iter().map(IndexModel::named).collect(),
        }
    }

    /// Names of all listed indexes.
    pub fn names(&self) -> Vec<&str> {
        self.indexes.iter().map(|index| index.name.as_str()).collect()
    }

    /// Whether an index with exactly this name is listed.
    pub fn contains(&self, name: &str) -> bool {
        self.indexes.iter().any(|index| index.name == name)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<IndexModel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<IndexModel>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for creating an index.
///
/// `spec` is always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateIndexRequest {
    pub name: String,
    pub dimension: u32,
    pub metric: Metric,
    pub spec: Option<Value>,
}
