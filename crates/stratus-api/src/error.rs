//! Repository-level error classification.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Failure kinds a repository reports to its callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Local encode failure, or a resource that could not be mapped to a
    /// model. Encode failures never reach the network.
    #[error("failed to marshal JSON: {message}")]
    Marshaling {
        /// Description of what could not be encoded or mapped.
        message: String,
    },

    /// Opaque failure from the gateway.
    #[error(transparent)]
    Transport(#[from] GatewayError),

    /// A query succeeded but matched nothing, or the server no longer knows
    /// the addressed GUID.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind that was searched for.
        kind: &'static str,
        /// Name or GUID that was searched for.
        id: String,
    },

    /// The server rejected a well-formed request on business rules.
    #[error("server rejected the request: {description}")]
    Validation {
        /// Numeric API error code, when the server sent one.
        code: Option<u64>,
        /// Symbolic API error code, when the server sent one.
        error_code: Option<String>,
        /// Human-readable reason.
        description: String,
    },
}

impl ApiError {
    /// Builds a marshaling error from any displayable cause.
    pub fn marshaling(message: impl Into<String>) -> Self {
        Self::Marshaling {
            message: message.into(),
        }
    }

    /// Builds a not-found error for an entity kind and identifier.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether this error reports a missing entity.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias for repository results.
pub type Result<T> = std::result::Result<T, ApiError>;
