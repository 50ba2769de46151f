//! Domain models returned by the repositories.
//!
//! Models are created fresh per call and only ever produced by the
//! resource mapping in [`crate::resources`].

pub mod application;
pub mod environment;
pub mod organization;

pub use application::{AppParams, Application, RouteSummary, ServiceBindingSummary};
pub use environment::{EnvValue, Environment};
pub use organization::{DomainSummary, Organization, QuotaDefinition, SpaceSummary};
