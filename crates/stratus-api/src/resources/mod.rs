//! Wire-level resource envelopes.
//!
//! Every aggregate travels as `{"metadata": {...}, "entity": {...}}`, and
//! collections as a page of such envelopes plus an optional `next_url`.
//! Envelopes deserialize leniently (unknown fields ignored, relationships
//! optional); [`ToModel`] is where required fields are enforced.

pub mod application;
pub mod environment;
pub mod organization;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stratus_common::types::Guid;

use crate::error::{ApiError, Result};

/// Conversion of a wire envelope into its domain model.
pub trait ToModel {
    /// Domain model produced by the mapping.
    type Model;

    /// Maps the envelope, rejecting missing required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Marshaling`] if a required field is absent.
    fn to_model(&self) -> Result<Self::Model>;
}

/// Server-side bookkeeping attached to every resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Resource identifier.
    #[serde(default)]
    pub guid: Option<Guid>,
    /// Canonical path of the resource.
    #[serde(default)]
    pub url: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single resource envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource<E> {
    /// Identity and bookkeeping.
    #[serde(default)]
    pub metadata: Metadata,
    /// Entity attributes.
    #[serde(default)]
    pub entity: E,
}

impl<E> Resource<E> {
    /// Returns the resource GUID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Marshaling`] if the GUID is missing or empty.
    pub fn require_guid(&self, kind: &str) -> Result<Guid> {
        match &self.metadata.guid {
            Some(guid) if !guid.is_empty() => Ok(guid.clone()),
            _ => Err(ApiError::marshaling(format!("{kind} resource is missing metadata.guid"))),
        }
    }
}

/// One page of a resource collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de> + Default"))]
pub struct PaginatedResources<E> {
    /// Total number of results across all pages.
    #[serde(default)]
    pub total_results: Option<u64>,
    /// Reference to the next page, if any.
    #[serde(default)]
    pub next_url: Option<String>,
    /// Resources on this page.
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

/// Returns a required string attribute.
pub(crate) fn require_field(kind: &str, field: &str, value: Option<&String>) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| ApiError::marshaling(format!("{kind} resource is missing entity.{field}")))
}

/// Maps an optional inlined collection, treating absence as empty.
pub(crate) fn map_inlined<E, M>(
    resources: Option<&Vec<Resource<E>>>,
    map: impl Fn(&Resource<E>) -> Result<M>,
) -> Result<Vec<M>> {
    resources.map_or_else(|| Ok(Vec::new()), |items| items.iter().map(map).collect())
}
