//! Application repository.

use std::rc::Rc;

use stratus_common::config::SessionContext;
use stratus_common::types::Guid;

use super::{ResourceClient, name_filter};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::{AppParams, Application, Environment};
use crate::resources::ToModel;
use crate::resources::application::{ApplicationEntity, ApplicationRequest};
use crate::resources::environment::EnvironmentResource;

/// Domain operations on applications.
pub trait ApplicationRepository {
    /// Creates an application; the server assigns its GUID.
    ///
    /// # Errors
    ///
    /// Returns `Marshaling`, `Transport`, or `Validation`.
    fn create(&self, params: &AppParams) -> Result<Application>;

    /// Looks up an application by name in the targeted space.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` carrying `name` when nothing matches.
    fn read(&self, name: &str) -> Result<Application>;

    /// Updates an application and returns the server-accepted state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the GUID no longer exists, `Transport`, or `Validation`.
    fn update(&self, guid: &Guid, params: &AppParams) -> Result<Application>;

    /// Deletes an application and its dependent resources.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Transport`.
    fn delete(&self, guid: &Guid) -> Result<()>;

    /// Reads the four environment variable groups of an application.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Transport`; an empty environment is only ever
    /// returned on success.
    fn read_env(&self, guid: &Guid) -> Result<Environment>;

    /// Asks the server to restage an application. Returns once the request
    /// is accepted, not once restaging completes.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Transport`.
    fn create_restage_request(&self, guid: &Guid) -> Result<()>;
}

/// Application repository backed by the control plane's `/v2/apps` API.
pub struct CloudControllerApplicationRepository {
    client: ResourceClient<ApplicationEntity>,
}

impl CloudControllerApplicationRepository {
    /// Creates the repository for a session.
    pub fn new(session: Rc<SessionContext>, gateway: Rc<dyn Gateway>) -> Self {
        Self {
            client: ResourceClient::new(session, gateway, "App", "/v2/apps"),
        }
    }
}

impl ApplicationRepository for CloudControllerApplicationRepository {
    fn create(&self, params: &AppParams) -> Result<Application> {
        self.client.create(&ApplicationRequest::from(params))
    }

    fn read(&self, name: &str) -> Result<Application> {
        let space_guid = self
            .client
            .session()
            .space()
            .map(|s| s.guid.to_string())
            .unwrap_or_default();
        let url = self.client.address(&format!(
            "/v2/spaces/{space_guid}/apps?q={}&inline-relations-depth=1",
            name_filter(name)
        ));
        self.client.find_first(&url, name)
    }

    fn update(&self, guid: &Guid, params: &AppParams) -> Result<Application> {
        let url = self.client.entity_address(guid, "?inline-relations-depth=1");
        self.client.update(&url, guid, &ApplicationRequest::from(params))
    }

    fn delete(&self, guid: &Guid) -> Result<()> {
        let url = self.client.entity_address(guid, "?recursive=true");
        self.client.delete(&url, guid)
    }

    fn read_env(&self, guid: &Guid) -> Result<Environment> {
        let url = self.client.entity_address(guid, "/env");
        let resource: EnvironmentResource = self.client.fetch(&url, guid)?;
        resource.to_model()
    }

    fn create_restage_request(&self, guid: &Guid) -> Result<()> {
        let url = self.client.entity_address(guid, "/restage");
        self.client.trigger(&url, guid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::RecordingGateway;
    use serde_json::json;
    use stratus_common::types::TargetFields;

    const BASE: &str = "https://api.example.com";

    fn setup() -> (Rc<RecordingGateway>, CloudControllerApplicationRepository) {
        let session = SessionContext::new(BASE)
            .with_access_token("token")
            .with_space(TargetFields::new("my-space-guid", "my-space"));
        let gateway = Rc::new(RecordingGateway::new());
        let repo = CloudControllerApplicationRepository::new(Rc::new(session), gateway.clone());
        (gateway, repo)
    }

    fn app_resource(guid: &str, name: &str) -> serde_json::Value {
        json!({"metadata": {"guid": guid}, "entity": {"name": name, "instances": 1, "memory": 128}})
    }

    const FIND_URL: &str =
        "https://api.example.com/v2/spaces/my-space-guid/apps?q=name%3Amy-app&inline-relations-depth=1";

    #[test]
    fn create_posts_params_to_apps() {
        let (gateway, repo) = setup();
        gateway.respond_json("POST", &format!("{BASE}/v2/apps"), app_resource("new-guid", "my-app"));

        let params = AppParams {
            name: Some("my-app".into()),
            space_guid: Some(Guid::new("my-space-guid")),
            instances: Some(1),
            memory: Some(128),
            ..AppParams::default()
        };
        let app = repo.create(&params).unwrap();

        assert_eq!(app.guid, Guid::new("new-guid"));
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"name": "my-app", "space_guid": "my-space-guid", "instances": 1, "memory": 128})
        );
    }

    #[test]
    fn create_surfaces_validation_errors() {
        let (gateway, repo) = setup();
        gateway.respond(
            "POST",
            &format!("{BASE}/v2/apps"),
            Err(crate::gateway::GatewayError::Http {
                status: 400,
                url: String::new(),
                body: Some(crate::gateway::ApiErrorBody {
                    code: Some(100_001),
                    description: Some("The app is invalid: memory must be positive".into()),
                    error_code: Some("CF-AppInvalid".into()),
                }),
            }),
        );
        let err = repo.create(&AppParams::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }), "got: {err}");
    }

    #[test]
    fn read_filters_by_name_in_targeted_space() {
        let (gateway, repo) = setup();
        gateway.respond_json(
            "GET",
            FIND_URL,
            json!({"total_results": 1, "resources": [app_resource("app1-guid", "my-app")]}),
        );

        let app = repo.read("my-app").unwrap();
        assert_eq!(app.guid, Guid::new("app1-guid"));
        assert_eq!(app.name, "my-app");
        assert_eq!(gateway.requests()[0].url, FIND_URL);
    }

    #[test]
    fn read_with_no_match_is_not_found_with_queried_name() {
        let (gateway, repo) = setup();
        gateway.respond_json("GET", FIND_URL, json!({"total_results": 0, "resources": []}));

        let err = repo.read("my-app").unwrap_err();
        match err {
            ApiError::NotFound { kind, id } => {
                assert_eq!(kind, "App");
                assert_eq!(id, "my-app");
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn read_with_several_matches_uses_the_first() {
        let (gateway, repo) = setup();
        gateway.respond_json(
            "GET",
            FIND_URL,
            json!({"resources": [app_resource("first", "my-app"), app_resource("second", "my-app")]}),
        );
        assert_eq!(repo.read("my-app").unwrap().guid, Guid::new("first"));
    }

    #[test]
    fn read_does_not_follow_pagination() {
        let (gateway, repo) = setup();
        gateway.respond_json(
            "GET",
            FIND_URL,
            json!({"next_url": "/v2/spaces/my-space-guid/apps?page=2", "resources": [app_resource("a", "my-app")]}),
        );
        let _ = repo.read("my-app").unwrap();
        assert_eq!(gateway.requests().len(), 1);
    }

    #[test]
    fn read_with_malformed_resource_is_marshaling_error() {
        let (gateway, repo) = setup();
        gateway.respond_json("GET", FIND_URL, json!({"resources": [{"entity": {"name": "my-app"}}]}));
        let err = repo.read("my-app").unwrap_err();
        assert!(matches!(err, ApiError::Marshaling { .. }), "got: {err}");
    }

    #[test]
    fn update_puts_to_guid_with_inline_relations() {
        let (gateway, repo) = setup();
        let url = format!("{BASE}/v2/apps/my-app-guid?inline-relations-depth=1");
        gateway.respond_json("PUT", &url, app_resource("my-app-guid", "my-app"));

        let params = AppParams {
            instances: Some(5),
            ..AppParams::default()
        };
        let app = repo.update(&Guid::new("my-app-guid"), &params).unwrap();

        assert_eq!(app.guid, Guid::new("my-app-guid"));
        let request = &gateway.requests()[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(request.url, url);
        assert_eq!(request.body.as_deref(), Some(r#"{"instances":5}"#));
    }

    #[test]
    fn update_of_vanished_guid_is_not_found() {
        let (gateway, repo) = setup();
        gateway.respond_status("PUT", &format!("{BASE}/v2/apps/gone?inline-relations-depth=1"), 404);
        let err = repo.update(&Guid::new("gone"), &AppParams::default()).unwrap_err();
        assert!(err.is_not_found(), "got: {err}");
    }

    #[test]
    fn delete_is_always_recursive() {
        let (gateway, repo) = setup();
        let url = format!("{BASE}/v2/apps/my-app-guid?recursive=true");
        gateway.respond("DELETE", &url, Ok(None));

        repo.delete(&Guid::new("my-app-guid")).unwrap();
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].url, url);
    }

    #[test]
    fn read_env_maps_all_groups() {
        let (gateway, repo) = setup();
        gateway.respond_json(
            "GET",
            &format!("{BASE}/v2/apps/my-app-guid/env"),
            json!({
                "environment_json": {"key": "value"},
                "system_env_json": {"VCAP_SERVICES": {"mysql": [{"name": "db"}]}},
                "running_env_json": {"running-key": "running-value"},
                "staging_env_json": {"staging-key": "staging-value"}
            }),
        );
        let env = repo.read_env(&Guid::new("my-app-guid")).unwrap();
        assert_eq!(env.environment.get("key").map(String::as_str), Some("value"));
        assert!(env.system.contains_key("VCAP_SERVICES"));
        assert_eq!(env.running.get("running-key").map(String::as_str), Some("running-value"));
        assert_eq!(env.staging.get("staging-key").map(String::as_str), Some("staging-value"));
    }

    #[test]
    fn read_env_failure_is_an_error_not_an_empty_environment() {
        let (gateway, repo) = setup();
        gateway.respond_status("GET", &format!("{BASE}/v2/apps/my-app-guid/env"), 500);
        let err = repo.read_env(&Guid::new("my-app-guid")).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got: {err}");
    }

    #[test]
    fn restage_posts_empty_body_once() {
        let (gateway, repo) = setup();
        let url = format!("{BASE}/v2/apps/my-app-guid/restage");
        gateway.respond_json("POST", &url, json!({"metadata": {"guid": "my-app-guid"}, "entity": {"state": "STAGING"}}));

        repo.create_restage_request(&Guid::new("my-app-guid")).unwrap();
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, url);
        assert_eq!(requests[0].body.as_deref(), Some(""));
    }

    #[test]
    fn transport_failure_propagates_unchanged() {
        let (_gateway, repo) = setup();
        let err = repo.delete(&Guid::new("unreachable")).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got: {err}");
        assert!(err.to_string().contains("no canned response"));
    }
}
