//! `reqwest` blocking implementation of the gateway.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use stratus_common::config::SessionContext;
use stratus_common::constants::{DEFAULT_REQUEST_TIMEOUT, USER_AGENT};

use super::{ApiErrorBody, Gateway, GatewayError, GatewayResult};

/// Gateway that performs real HTTP requests with the session's bearer token.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    authorization: Option<String>,
}

impl HttpGateway {
    /// Creates a gateway with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(session: &SessionContext) -> GatewayResult<Self> {
        Self::with_timeout(session, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a gateway with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_timeout(session: &SessionContext, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::Connection {
                method: "INIT",
                url: session.api_endpoint().to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(?timeout, "configured HTTP gateway");
        Ok(Self {
            client,
            authorization: session.access_token().map(authorization_header),
        })
    }

    fn send(&self, method: Method, url: &str, body: Option<String>) -> GatewayResult<Option<Value>> {
        let method_name = method_name(&method);
        tracing::debug!(method = method_name, url, "sending request");

        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(auth) = &self.authorization {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().map_err(|e| GatewayError::Connection {
            method: method_name,
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let status = response.status();
        let text = response.text().map_err(|e| GatewayError::Connection {
            method: method_name,
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;
        tracing::debug!(status = status.as_u16(), url, "received response");

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                url: url.to_string(),
                body: serde_json::from_str::<ApiErrorBody>(&text).ok(),
            });
        }
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| GatewayError::MalformedResponse {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

impl Gateway for HttpGateway {
    fn create_resource(&self, url: &str, body: String) -> GatewayResult<Option<Value>> {
        self.send(Method::POST, url, Some(body))
    }

    fn get_resource(&self, url: &str) -> GatewayResult<Option<Value>> {
        self.send(Method::GET, url, None)
    }

    fn update_resource(&self, url: &str, body: String) -> GatewayResult<Option<Value>> {
        self.send(Method::PUT, url, Some(body))
    }

    fn delete_resource(&self, url: &str) -> GatewayResult<()> {
        self.send(Method::DELETE, url, None).map(|_| ())
    }
}

/// Tokens are stored either bare or with their `bearer` scheme prefix.
fn authorization_header(token: &str) -> String {
    if token.to_ascii_lowercase().starts_with("bearer ") {
        token.to_string()
    } else {
        format!("bearer {token}")
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        _ => "GET",
    }
}
