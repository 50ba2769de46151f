//! Application environment envelope (`/v2/apps/{guid}/env`).

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ToModel;
use super::application::stringify;
use crate::error::Result;
use crate::models::{EnvValue, Environment};

/// Body of the application environment endpoint.
///
/// Every group is optional; absence maps to an empty group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvironmentResource {
    /// User-defined variables.
    #[serde(default)]
    pub environment_json: Option<Map<String, Value>>,
    /// Platform-injected variables such as `VCAP_SERVICES`.
    #[serde(default)]
    pub system_env_json: Option<Map<String, Value>>,
    /// Platform-injected application descriptor (`VCAP_APPLICATION`).
    #[serde(default)]
    pub application_env_json: Option<Map<String, Value>>,
    /// Running environment variable group.
    #[serde(default)]
    pub running_env_json: Option<Map<String, Value>>,
    /// Staging environment variable group.
    #[serde(default)]
    pub staging_env_json: Option<Map<String, Value>>,
}

fn string_group(group: Option<&Map<String, Value>>) -> std::collections::HashMap<String, String> {
    group
        .into_iter()
        .flatten()
        .map(|(k, v)| (k.clone(), stringify(v)))
        .collect()
}

impl ToModel for EnvironmentResource {
    type Model = Environment;

    fn to_model(&self) -> Result<Environment> {
        let system = self
            .system_env_json
            .iter()
            .chain(self.application_env_json.iter())
            .flatten()
            .map(|(k, v)| (k.clone(), EnvValue::from(v.clone())))
            .collect();

        Ok(Environment {
            environment: string_group(self.environment_json.as_ref()),
            system,
            running: string_group(self.running_env_json.as_ref()),
            staging: string_group(self.staging_env_json.as_ref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_groups_are_mapped() {
        let resource: EnvironmentResource = serde_json::from_value(json!({
            "environment_json": {"my-key": "my-value", "count": 3},
            "system_env_json": {"VCAP_SERVICES": {"pump-yer-brakes": "drive-slow"}},
            "application_env_json": {"VCAP_APPLICATION": {"name": "my-app"}},
            "running_env_json": {"running-key-1": "running-value-1"},
            "staging_env_json": {"staging-key-1": "staging-value-1"}
        }))
        .unwrap();
        let env = resource.to_model().unwrap();

        assert_eq!(env.environment.get("my-key").map(String::as_str), Some("my-value"));
        assert_eq!(env.environment.get("count").map(String::as_str), Some("3"));
        assert!(env.system.contains_key("VCAP_SERVICES"));
        assert!(env.system.contains_key("VCAP_APPLICATION"));
        assert_eq!(env.running.len(), 1);
        assert_eq!(env.staging.len(), 1);
    }

    #[test]
    fn absent_groups_map_to_empty() {
        let resource: EnvironmentResource = serde_json::from_value(json!({})).unwrap();
        assert!(resource.to_model().unwrap().is_empty());
    }

    #[test]
    fn null_groups_map_to_empty() {
        let resource: EnvironmentResource =
            serde_json::from_value(json!({"environment_json": null, "staging_env_json": null})).unwrap();
        assert!(resource.to_model().unwrap().is_empty());
    }
}
