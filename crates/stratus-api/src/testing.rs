//! Recording gateway used by repository tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use crate::gateway::{Gateway, GatewayError, GatewayResult};

/// A request observed by [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<String>,
}

type Canned = GatewayResult<Option<Value>>;

/// Replays canned responses per `(method, url)` and records every call.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    requests: RefCell<Vec<RecordedRequest>>,
    responses: RefCell<HashMap<(&'static str, String), VecDeque<Canned>>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &'static str, url: &str, response: Canned) {
        self.responses
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn respond_json(&self, method: &'static str, url: &str, body: Value) {
        self.respond(method, url, Ok(Some(body)));
    }

    pub fn respond_status(&self, method: &'static str, url: &str, status: u16) {
        self.respond(
            method,
            url,
            Err(GatewayError::Http {
                status,
                url: url.to_string(),
                body: None,
            }),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn call(&self, method: &'static str, url: &str, body: Option<String>) -> Canned {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
        });
        self.responses
            .borrow_mut()
            .get_mut(&(method, url.to_string()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(GatewayError::Connection {
                    method,
                    url: url.to_string(),
                    message: "no canned response".to_string(),
                })
            })
    }
}

impl Gateway for RecordingGateway {
    fn create_resource(&self, url: &str, body: String) -> GatewayResult<Option<Value>> {
        self.call("POST", url, Some(body))
    }

    fn get_resource(&self, url: &str) -> GatewayResult<Option<Value>> {
        self.call("GET", url, None)
    }

    fn update_resource(&self, url: &str, body: String) -> GatewayResult<Option<Value>> {
        self.call("PUT", url, Some(body))
    }

    fn delete_resource(&self, url: &str) -> GatewayResult<()> {
        self.call("DELETE", url, None).map(|_| ())
    }
}
