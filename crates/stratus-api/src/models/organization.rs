//! Organization aggregate and its quota.

use stratus_common::types::Guid;

/// An organization with its inlined relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    /// Server-assigned identifier.
    pub guid: Guid,
    /// Organization name.
    pub name: String,
    /// Spaces owned by the organization.
    pub spaces: Vec<SpaceSummary>,
    /// Domains owned by or shared with the organization.
    pub domains: Vec<DomainSummary>,
    /// The organization's quota. Only present when the server inlined it,
    /// which collection listings do not.
    pub quota_definition: Option<QuotaDefinition>,
}

/// Name-only view of a space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceSummary {
    /// Space identifier.
    pub guid: Guid,
    /// Space name.
    pub name: String,
}

/// Name-only view of a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSummary {
    /// Domain identifier.
    pub guid: Guid,
    /// Domain name.
    pub name: String,
}

/// Resource limits of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaDefinition {
    /// Quota name.
    pub name: String,
    /// Total memory limit in megabytes.
    pub memory_limit: u64,
    /// Maximum number of routes; `-1` means unlimited.
    pub routes_limit: i64,
    /// Maximum number of service instances; `-1` means unlimited.
    pub services_limit: i64,
    /// Whether paid service plans may be used.
    pub non_basic_services_allowed: bool,
}
