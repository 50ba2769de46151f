//! Repository layer.
//!
//! [`ResourceClient`] is the shared REST machinery: it builds addresses from
//! the session's API endpoint, encodes bodies, follows pagination, maps
//! envelopes through [`ToModel`], and classifies gateway failures. The
//! per-aggregate repositories only supply paths, query parameters, and the
//! entity type.

pub mod applications;
pub mod organizations;

use std::collections::HashSet;
use std::marker::PhantomData;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use stratus_common::config::SessionContext;
use stratus_common::types::Guid;

use crate::error::{ApiError, Result};
use crate::gateway::{self, Gateway, GatewayError};
use crate::resources::{PaginatedResources, Resource, ToModel};

pub use applications::{ApplicationRepository, CloudControllerApplicationRepository};
pub use organizations::{CloudControllerOrganizationRepository, OrganizationRepository};

/// Model type produced by mapping a `Resource<E>`.
pub type ModelOf<E> = <Resource<E> as ToModel>::Model;

/// Generic REST client for one aggregate type.
pub struct ResourceClient<E> {
    session: Rc<SessionContext>,
    gateway: Rc<dyn Gateway>,
    kind: &'static str,
    collection_path: &'static str,
    entity: PhantomData<fn() -> E>,
}

impl<E> ResourceClient<E>
where
    E: DeserializeOwned + Default,
    Resource<E>: ToModel,
{
    /// Creates a client for the aggregate living at `collection_path`.
    pub fn new(
        session: Rc<SessionContext>,
        gateway: Rc<dyn Gateway>,
        kind: &'static str,
        collection_path: &'static str,
    ) -> Self {
        Self {
            session,
            gateway,
            kind,
            collection_path,
            entity: PhantomData,
        }
    }

    /// Entity kind used in not-found errors.
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Session this client addresses.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Prefixes `path` with the API endpoint.
    pub fn address(&self, path: &str) -> String {
        format!("{}{path}", self.session.api_endpoint())
    }

    /// Address of the aggregate collection.
    pub fn collection_address(&self) -> String {
        self.address(self.collection_path)
    }

    /// Address of one entity, followed by `suffix` (sub-path and/or query).
    pub fn entity_address(&self, guid: &Guid, suffix: &str) -> String {
        format!("{}/{guid}{suffix}", self.collection_address())
    }

    /// Resolves a pagination reference, which the API sends as a path.
    fn resolve(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else {
            self.address(reference)
        }
    }

    /// Encodes `body` and `POST`s it to the collection.
    ///
    /// # Errors
    ///
    /// Returns a marshaling error before any network call if encoding fails,
    /// otherwise a classified gateway or mapping error.
    pub fn create(&self, body: &impl Serialize) -> Result<ModelOf<E>> {
        let data = encode(body)?;
        let url = self.collection_address();
        tracing::debug!(kind = self.kind, %url, "creating resource");
        let response = self
            .gateway
            .create_resource(&url, data)
            .map_err(|e| classify(e, None))?;
        self.map_one(&url, response)
    }

    /// Encodes `body` and `PUT`s it to `url`, which addresses `guid`.
    ///
    /// # Errors
    ///
    /// Returns a marshaling error before any network call if encoding fails,
    /// `NotFound` if the GUID no longer exists, otherwise a classified error.
    pub fn update(&self, url: &str, guid: &Guid, body: &impl Serialize) -> Result<ModelOf<E>> {
        let data = encode(body)?;
        tracing::debug!(kind = self.kind, %url, "updating resource");
        let response = self
            .gateway
            .update_resource(url, data)
            .map_err(|e| classify(e, Some((self.kind, guid.as_str()))))?;
        self.map_one(url, response)
    }

    /// `DELETE`s `url`, which addresses `guid`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the GUID no longer exists, otherwise a
    /// classified gateway error.
    pub fn delete(&self, url: &str, guid: &Guid) -> Result<()> {
        tracing::debug!(kind = self.kind, %url, "deleting resource");
        self.gateway
            .delete_resource(url)
            .map_err(|e| classify(e, Some((self.kind, guid.as_str()))))
    }

    /// `POST`s an empty body to `url`, which addresses `guid`, ignoring
    /// whatever the server answers with.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the GUID no longer exists, otherwise a
    /// classified gateway error.
    pub fn trigger(&self, url: &str, guid: &Guid) -> Result<()> {
        tracing::debug!(kind = self.kind, %url, "posting trigger request");
        self.gateway
            .create_resource(url, String::new())
            .map(|_| ())
            .map_err(|e| classify(e, Some((self.kind, guid.as_str()))))
    }

    /// `GET`s `url`, which addresses `guid`, decoding the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the GUID no longer exists, otherwise a
    /// classified gateway error.
    pub fn fetch<T: DeserializeOwned>(&self, url: &str, guid: &Guid) -> Result<T> {
        let body = self
            .gateway
            .get_resource(url)
            .map_err(|e| classify(e, Some((self.kind, guid.as_str()))))?;
        Ok(gateway::decode(url, body)?)
    }

    /// Fetches a single page and maps its first resource.
    ///
    /// Used for exact-match name filters, where more than one page is not
    /// expected. Further matches are ignored.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` carrying `searched` if the page is empty.
    pub fn find_first(&self, url: &str, searched: &str) -> Result<ModelOf<E>> {
        let page = self.fetch_page(url)?;
        if page.resources.len() > 1 {
            tracing::warn!(
                kind = self.kind,
                searched,
                matches = page.resources.len(),
                "name filter matched more than one resource, using the first"
            );
        }
        page.resources
            .first()
            .ok_or_else(|| ApiError::not_found(self.kind, searched))?
            .to_model()
    }

    /// Fetches every page starting at `url`, mapping all resources.
    ///
    /// # Errors
    ///
    /// Returns the first gateway or mapping error; no partial list is returned.
    /// A `next_url` pointing back at an already fetched page is a transport
    /// error, since following it would never terminate.
    pub fn list_all(&self, url: &str) -> Result<Vec<ModelOf<E>>> {
        let mut models = Vec::new();
        let mut visited = HashSet::new();
        let mut current = url.to_string();
        loop {
            let page = self.fetch_page(&current)?;
            let _ = visited.insert(current.clone());
            for resource in &page.resources {
                models.push(resource.to_model()?);
            }
            let Some(next) = page.next_url.as_deref().filter(|n| !n.is_empty()) else {
                break;
            };
            let next = self.resolve(next);
            if visited.contains(&next) {
                tracing::warn!(kind = self.kind, url = %next, pages = visited.len(), "pagination cycle detected");
                return Err(ApiError::Transport(GatewayError::MalformedResponse {
                    url: current,
                    message: format!("next_url {next} points at a page already fetched"),
                }));
            }
            tracing::debug!(kind = self.kind, page = visited.len(), url = %next, "following next page");
            current = next;
        }
        tracing::debug!(kind = self.kind, pages = visited.len(), total = models.len(), "pagination exhausted");
        Ok(models)
    }

    fn fetch_page(&self, url: &str) -> Result<PaginatedResources<E>> {
        tracing::debug!(kind = self.kind, %url, "fetching page");
        let body = self.gateway.get_resource(url).map_err(|e| classify(e, None))?;
        Ok(gateway::decode(url, body)?)
    }

    fn map_one(&self, url: &str, body: Option<serde_json::Value>) -> Result<ModelOf<E>> {
        let resource: Resource<E> = gateway::decode(url, body)?;
        resource.to_model()
    }
}

/// Builds the exact-match name filter, query-escaped.
pub fn name_filter(name: &str) -> String {
    url::form_urlencoded::byte_serialize(format!("name:{name}").as_bytes()).collect()
}

fn encode(body: &impl Serialize) -> Result<String> {
    serde_json::to_string(body).map_err(|e| ApiError::marshaling(e.to_string()))
}

/// Classifies a gateway failure.
///
/// `addressed` names the entity a GUID-addressed request targeted; a 404 on
/// such a request means the entity no longer exists. Searches pass `None`
/// since they report "no match" as an empty page instead.
pub fn classify(err: GatewayError, addressed: Option<(&'static str, &str)>) -> ApiError {
    match (err, addressed) {
        (GatewayError::Http { status: 404, .. }, Some((kind, id))) => ApiError::not_found(kind, id),
        (
            GatewayError::Http {
                status: 400 | 422,
                body: Some(body),
                ..
            },
            _,
        ) => ApiError::Validation {
            code: body.code,
            description: body
                .description
                .or_else(|| body.error_code.clone())
                .unwrap_or_else(|| "request rejected".to_string()),
            error_code: body.error_code,
        },
        (other, _) => ApiError::Transport(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ApiErrorBody;

    #[test]
    fn name_filter_escapes_like_a_query_component() {
        assert_eq!(name_filter("my-app"), "name%3Amy-app");
        assert_eq!(name_filter("my app&co"), "name%3Amy+app%26co");
    }

    #[test]
    fn not_found_status_on_addressed_request_is_not_found() {
        let err = classify(
            GatewayError::Http {
                status: 404,
                url: "u".into(),
                body: None,
            },
            Some(("App", "app-guid")),
        );
        assert_eq!(err.to_string(), "App app-guid not found");
    }

    #[test]
    fn not_found_status_on_search_stays_transport() {
        let err = classify(
            GatewayError::Http {
                status: 404,
                url: "u".into(),
                body: None,
            },
            None,
        );
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn rejected_payload_is_validation() {
        let err = classify(
            GatewayError::Http {
                status: 400,
                url: "u".into(),
                body: Some(ApiErrorBody {
                    code: Some(100_002),
                    description: Some("The app name is taken: my-app".into()),
                    error_code: Some("CF-AppNameTaken".into()),
                }),
            },
            None,
        );
        match err {
            ApiError::Validation {
                code,
                error_code,
                description,
            } => {
                assert_eq!(code, Some(100_002));
                assert_eq!(error_code.as_deref(), Some("CF-AppNameTaken"));
                assert_eq!(description, "The app name is taken: my-app");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn server_error_stays_transport() {
        let err = classify(
            GatewayError::Http {
                status: 500,
                url: "u".into(),
                body: Some(ApiErrorBody::default()),
            },
            Some(("App", "g")),
        );
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
