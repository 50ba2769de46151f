//! Application envelopes and request bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stratus_common::types::Guid;

use super::{Resource, ToModel, map_inlined, require_field};
use crate::error::Result;
use crate::models::{AppParams, Application, RouteSummary, ServiceBindingSummary, SpaceSummary};

/// Entity attributes of an application resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApplicationEntity {
    /// Application name.
    #[serde(default)]
    pub name: Option<String>,
    /// Owning space.
    #[serde(default)]
    pub space_guid: Option<Guid>,
    /// Stack.
    #[serde(default)]
    pub stack_guid: Option<Guid>,
    /// Requested state.
    #[serde(default)]
    pub state: Option<String>,
    /// Instance count.
    #[serde(default)]
    pub instances: Option<u32>,
    /// Memory in megabytes.
    #[serde(default)]
    pub memory: Option<u64>,
    /// Disk quota in megabytes.
    #[serde(default)]
    pub disk_quota: Option<u64>,
    /// Buildpack.
    #[serde(default)]
    pub buildpack: Option<String>,
    /// Start command.
    #[serde(default)]
    pub command: Option<String>,
    /// User-provided variables.
    #[serde(default)]
    pub environment_json: Option<Map<String, Value>>,
    /// Health check type.
    #[serde(default)]
    pub health_check_type: Option<String>,
    /// Inlined owning space.
    #[serde(default)]
    pub space: Option<Resource<NamedEntity>>,
    /// Inlined routes.
    #[serde(default)]
    pub routes: Option<Vec<Resource<RouteEntity>>>,
    /// Inlined service bindings.
    #[serde(default)]
    pub service_bindings: Option<Vec<Resource<ServiceBindingEntity>>>,
}

/// Any entity whose only attribute of interest is its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    /// Entity name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Entity attributes of a route resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteEntity {
    /// Host part of the route.
    #[serde(default)]
    pub host: Option<String>,
    /// Domain of the route.
    #[serde(default)]
    pub domain_guid: Option<Guid>,
}

/// Entity attributes of a service binding resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceBindingEntity {
    /// Bound service instance.
    #[serde(default)]
    pub service_instance_guid: Option<Guid>,
}

/// Request body for creating or updating an application.
#[derive(Debug, Serialize)]
pub struct ApplicationRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    space_guid: Option<&'a Guid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack_guid: Option<&'a Guid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disk_quota: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buildpack: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment_json: Option<&'a BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    health_check_type: Option<&'a str>,
}

impl<'a> From<&'a AppParams> for ApplicationRequest<'a> {
    fn from(params: &'a AppParams) -> Self {
        Self {
            name: params.name.as_deref(),
            space_guid: params.space_guid.as_ref(),
            stack_guid: params.stack_guid.as_ref(),
            state: params.state.as_deref(),
            instances: params.instances,
            memory: params.memory,
            disk_quota: params.disk_quota,
            buildpack: params.buildpack.as_deref(),
            command: params.command.as_deref(),
            environment_json: params.environment_vars.as_ref(),
            health_check_type: params.health_check_type.as_deref(),
        }
    }
}

/// Renders a JSON value as a variable value: strings raw, anything else as JSON.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ToModel for Resource<ApplicationEntity> {
    type Model = Application;

    fn to_model(&self) -> Result<Application> {
        let guid = self.require_guid("App")?;
        let entity = &self.entity;
        let name = require_field("App", "name", entity.name.as_ref())?;

        let space = match &entity.space {
            Some(space) => Some(SpaceSummary {
                guid: space.require_guid("Space")?,
                name: space.entity.name.clone().unwrap_or_default(),
            }),
            None => None,
        };
        let routes = map_inlined(entity.routes.as_ref(), |route| {
            Ok(RouteSummary {
                guid: route.require_guid("Route")?,
                host: route.entity.host.clone().unwrap_or_default(),
                domain_guid: route.entity.domain_guid.clone(),
            })
        })?;
        let services = map_inlined(entity.service_bindings.as_ref(), |binding| {
            Ok(ServiceBindingSummary {
                guid: binding.require_guid("ServiceBinding")?,
                service_instance_guid: binding.entity.service_instance_guid.clone(),
            })
        })?;

        Ok(Application {
            guid,
            name,
            state: entity.state.clone(),
            instances: entity.instances.unwrap_or_default(),
            memory: entity.memory.unwrap_or_default(),
            disk_quota: entity.disk_quota.unwrap_or_default(),
            buildpack: entity.buildpack.clone(),
            command: entity.command.clone(),
            environment_vars: entity
                .environment_json
                .iter()
                .flatten()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            health_check_type: entity.health_check_type.clone(),
            space_guid: entity.space_guid.clone(),
            stack_guid: entity.stack_guid.clone(),
            space,
            routes,
            services,
            created_at: self.metadata.created_at,
        })
    }
}
