//! HTTP transport boundary.
//!
//! Repositories talk to the control plane exclusively through [`Gateway`].
//! Responses come back as untyped JSON; [`decode`] turns them into the
//! caller's wire type, reporting malformed bodies as transport failures.

pub mod http;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use http::HttpGateway;

/// Error body the control plane attaches to non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric error code.
    #[serde(default)]
    pub code: Option<u64>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Symbolic error code, e.g. `CF-AppNotFound`.
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Transport or protocol failure reported by a [`Gateway`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("error performing request {method} {url}: {message}")]
    Connection {
        /// HTTP method of the failed request.
        method: &'static str,
        /// Address of the failed request.
        url: String,
        /// Underlying failure.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("server error, status code: {status}, {}", describe_body(.body.as_ref()))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Address of the failed request.
        url: String,
        /// Parsed error body, if the server sent one.
        body: Option<ApiErrorBody>,
    },

    /// The response body was not the JSON the caller expected.
    #[error("invalid response body from {url}: {message}")]
    MalformedResponse {
        /// Address of the request.
        url: String,
        /// Decoder failure.
        message: String,
    },
}

fn describe_body(body: Option<&ApiErrorBody>) -> String {
    match body {
        Some(body) => format!(
            "error code: {}, message: {}",
            body.code.map_or_else(|| "-".to_string(), |c| c.to_string()),
            body.description.as_deref().unwrap_or("-")
        ),
        None => "no error body".to_string(),
    }
}

/// Result type of every gateway call.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Performs REST calls against the control plane.
///
/// Each method returns the decoded JSON body on success (`None` when the
/// server sent no content) and a structured error on any transport or
/// HTTP-status failure. Implementations own authentication and timeouts.
pub trait Gateway {
    /// Issues a `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, non-2xx status, or an
    /// undecodable body.
    fn create_resource(&self, url: &str, body: String) -> GatewayResult<Option<Value>>;

    /// Issues a `GET`.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, non-2xx status, or an
    /// undecodable body.
    fn get_resource(&self, url: &str) -> GatewayResult<Option<Value>>;

    /// Issues a `PUT` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, non-2xx status, or an
    /// undecodable body.
    fn update_resource(&self, url: &str, body: String) -> GatewayResult<Option<Value>>;

    /// Issues a `DELETE`.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or non-2xx status.
    fn delete_resource(&self, url: &str) -> GatewayResult<()>;
}

/// Decodes a gateway response body into `T`.
///
/// # Errors
///
/// Returns [`GatewayError::MalformedResponse`] if the body is absent or does
/// not match `T`.
pub fn decode<T: DeserializeOwned>(url: &str, body: Option<Value>) -> GatewayResult<T> {
    let value = body.ok_or_else(|| GatewayError::MalformedResponse {
        url: url.to_string(),
        message: "empty response body".to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| GatewayError::MalformedResponse {
        url: url.to_string(),
        message: e.to_string(),
    })
}
