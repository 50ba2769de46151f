//! Application aggregate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use stratus_common::types::Guid;

use super::organization::SpaceSummary;

/// A deployed application as known to the control plane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Application {
    /// Server-assigned identifier.
    pub guid: Guid,
    /// Name, unique within its space.
    pub name: String,
    /// Requested lifecycle state (`STARTED`/`STOPPED`).
    pub state: Option<String>,
    /// Desired instance count.
    pub instances: u32,
    /// Memory per instance in megabytes.
    pub memory: u64,
    /// Disk quota per instance in megabytes.
    pub disk_quota: u64,
    /// Buildpack name or URL.
    pub buildpack: Option<String>,
    /// Custom start command.
    pub command: Option<String>,
    /// User-provided environment variables, with the JSON values the server
    /// stored so untouched entries are written back unchanged.
    pub environment_vars: BTreeMap<String, Value>,
    /// Health check type (`port`, `process`, `http`).
    pub health_check_type: Option<String>,
    /// GUID of the owning space.
    pub space_guid: Option<Guid>,
    /// GUID of the stack the app runs on.
    pub stack_guid: Option<Guid>,
    /// Owning space, when inlined by the server.
    pub space: Option<SpaceSummary>,
    /// Routes mapped to the app.
    pub routes: Vec<RouteSummary>,
    /// Service instances bound to the app.
    pub services: Vec<ServiceBindingSummary>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// A route mapped to an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSummary {
    /// Route identifier.
    pub guid: Guid,
    /// Host part of the route.
    pub host: String,
    /// Domain the host lives under.
    pub domain_guid: Option<Guid>,
}

/// A binding between an application and a service instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceBindingSummary {
    /// Binding identifier.
    pub guid: Guid,
    /// Bound service instance.
    pub service_instance_guid: Option<Guid>,
}

/// Desired-state parameters for creating or updating an application.
///
/// Only fields that are `Some` are sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppParams {
    /// Application name.
    pub name: Option<String>,
    /// Owning space.
    pub space_guid: Option<Guid>,
    /// Stack to run on.
    pub stack_guid: Option<Guid>,
    /// Requested lifecycle state.
    pub state: Option<String>,
    /// Desired instance count.
    pub instances: Option<u32>,
    /// Memory per instance in megabytes.
    pub memory: Option<u64>,
    /// Disk quota per instance in megabytes.
    pub disk_quota: Option<u64>,
    /// Buildpack name or URL.
    pub buildpack: Option<String>,
    /// Custom start command.
    pub command: Option<String>,
    /// User-provided environment variables; replaces the whole set.
    pub environment_vars: Option<BTreeMap<String, Value>>,
    /// Health check type.
    pub health_check_type: Option<String>,
}
