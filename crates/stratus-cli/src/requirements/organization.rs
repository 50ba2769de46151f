//! A named organization exists.

use std::rc::Rc;

use stratus_api::models::Organization;
use stratus_api::repository::OrganizationRepository;

use super::{Evaluation, Requirement, RequirementError, RequirementState};

/// Resolves an organization by name and keeps it for the command.
pub struct OrganizationRequirement {
    name: String,
    orgs: Rc<dyn OrganizationRepository>,
    evaluation: Evaluation<Organization>,
}

impl OrganizationRequirement {
    /// Creates the requirement for the organization `name`.
    pub fn new(name: &str, orgs: Rc<dyn OrganizationRepository>) -> Self {
        Self {
            name: name.to_string(),
            orgs,
            evaluation: Evaluation::default(),
        }
    }

    /// The resolved organization, once the requirement is satisfied.
    pub fn organization(&self) -> Option<&Organization> {
        self.evaluation.value()
    }
}

impl Requirement for OrganizationRequirement {
    fn name(&self) -> &'static str {
        "organization"
    }

    fn execute(&self) -> Result<(), RequirementError> {
        self.evaluation
            .run(|| {
                tracing::debug!(org = %self.name, "resolving organization");
                self.orgs
                    .find_by_name(&self.name)
                    .map_err(|e| RequirementError::Unresolved(e.to_string()))
            })
            .map(|_| ())
    }

    fn state(&self) -> RequirementState {
        self.evaluation.state()
    }
}
