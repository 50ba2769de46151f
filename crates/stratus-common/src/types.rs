//! Domain primitive types used across the stratus workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an aggregate.
///
/// The only stable address of an entity once it exists; names are used
/// solely for the initial lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(String);

impl Guid {
    /// Creates a GUID from a string value.
    #[must_use]
    pub fn new(guid: impl Into<String>) -> Self {
        Self(guid.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the GUID carries no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Guid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Name and GUID of a targeted organization or space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFields {
    /// Identifier of the targeted entity.
    pub guid: Guid,
    /// Display name of the targeted entity.
    pub name: String,
}

impl TargetFields {
    /// Creates target fields from a GUID and a name.
    #[must_use]
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: Guid::new(guid),
            name: name.into(),
        }
    }
}
