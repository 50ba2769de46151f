//! Organization and quota envelopes.

use serde::Deserialize;

use super::application::NamedEntity;
use super::{Resource, ToModel, map_inlined, require_field};
use crate::error::Result;
use crate::models::{DomainSummary, Organization, QuotaDefinition, SpaceSummary};

/// Entity attributes of an organization resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrganizationEntity {
    /// Organization name.
    #[serde(default)]
    pub name: Option<String>,
    /// Inlined quota definition.
    #[serde(default)]
    pub quota_definition: Option<Resource<QuotaEntity>>,
    /// Inlined spaces.
    #[serde(default)]
    pub spaces: Option<Vec<Resource<NamedEntity>>>,
    /// Inlined domains.
    #[serde(default)]
    pub domains: Option<Vec<Resource<NamedEntity>>>,
}

/// Entity attributes of a quota definition resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuotaEntity {
    /// Quota name.
    #[serde(default)]
    pub name: Option<String>,
    /// Memory limit in megabytes.
    #[serde(default)]
    pub memory_limit: u64,
    /// Route limit.
    #[serde(default)]
    pub total_routes: i64,
    /// Service instance limit.
    #[serde(default)]
    pub total_services: i64,
    /// Whether paid plans are allowed.
    #[serde(default)]
    pub non_basic_services_allowed: bool,
}

impl ToModel for Resource<QuotaEntity> {
    type Model = QuotaDefinition;

    fn to_model(&self) -> Result<QuotaDefinition> {
        Ok(QuotaDefinition {
            name: require_field("QuotaDefinition", "name", self.entity.name.as_ref())?,
            memory_limit: self.entity.memory_limit,
            routes_limit: self.entity.total_routes,
            services_limit: self.entity.total_services,
            non_basic_services_allowed: self.entity.non_basic_services_allowed,
        })
    }
}

impl ToModel for Resource<OrganizationEntity> {
    type Model = Organization;

    fn to_model(&self) -> Result<Organization> {
        let guid = self.require_guid("Org")?;
        let name = require_field("Org", "name", self.entity.name.as_ref())?;
        let spaces = map_inlined(self.entity.spaces.as_ref(), |space| {
            Ok(SpaceSummary {
                guid: space.require_guid("Space")?,
                name: require_field("Space", "name", space.entity.name.as_ref())?,
            })
        })?;
        let domains = map_inlined(self.entity.domains.as_ref(), |domain| {
            Ok(DomainSummary {
                guid: domain.require_guid("Domain")?,
                name: require_field("Domain", "name", domain.entity.name.as_ref())?,
            })
        })?;
        let quota_definition = self
            .entity
            .quota_definition
            .as_ref()
            .map(ToModel::to_model)
            .transpose()?;

        Ok(Organization {
            guid,
            name,
            spaces,
            domains,
            quota_definition,
        })
    }
}
