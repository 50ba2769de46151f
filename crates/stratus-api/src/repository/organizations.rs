//! Organization repository.

use std::rc::Rc;

use stratus_common::config::SessionContext;

use super::{ResourceClient, name_filter};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::Organization;
use crate::resources::organization::OrganizationEntity;

/// Domain operations on organizations.
pub trait OrganizationRepository {
    /// Lists every organization visible to the user, across all pages.
    ///
    /// # Errors
    ///
    /// Returns `Transport` or `Marshaling`.
    fn list_orgs(&self) -> Result<Vec<Organization>>;

    /// Looks up an organization by name with its spaces, domains, and quota.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` carrying `name` when nothing matches.
    fn find_by_name(&self, name: &str) -> Result<Organization>;
}

/// Organization repository backed by `/v2/organizations`.
pub struct CloudControllerOrganizationRepository {
    client: ResourceClient<OrganizationEntity>,
}

impl CloudControllerOrganizationRepository {
    /// Creates the repository for a session.
    pub fn new(session: Rc<SessionContext>, gateway: Rc<dyn Gateway>) -> Self {
        Self {
            client: ResourceClient::new(session, gateway, "Org", "/v2/organizations"),
        }
    }
}

impl OrganizationRepository for CloudControllerOrganizationRepository {
    fn list_orgs(&self) -> Result<Vec<Organization>> {
        self.client.list_all(&self.client.collection_address())
    }

    fn find_by_name(&self, name: &str) -> Result<Organization> {
        let url = format!(
            "{}?q={}&inline-relations-depth=1",
            self.client.collection_address(),
            name_filter(name)
        );
        self.client.find_first(&url, name)
    }
}
