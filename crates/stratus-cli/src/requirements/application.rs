//! A named application exists in the targeted space.

use std::rc::Rc;

use stratus_api::models::Application;
use stratus_api::repository::ApplicationRepository;

use super::{Evaluation, Requirement, RequirementError, RequirementState};

/// Resolves an application by name and keeps it for the command.
///
/// Must be preceded by login and targeted-space requirements; the lookup is
/// scoped to the session's space.
pub struct ApplicationRequirement {
    name: String,
    apps: Rc<dyn ApplicationRepository>,
    evaluation: Evaluation<Application>,
}

impl ApplicationRequirement {
    /// Creates the requirement for the application `name`.
    pub fn new(name: &str, apps: Rc<dyn ApplicationRepository>) -> Self {
        Self {
            name: name.to_string(),
            apps,
            evaluation: Evaluation::default(),
        }
    }

    /// The resolved application, once the requirement is satisfied.
    pub fn application(&self) -> Option<&Application> {
        self.evaluation.value()
    }
}

impl Requirement for ApplicationRequirement {
    fn name(&self) -> &'static str {
        "application"
    }

    fn execute(&self) -> Result<(), RequirementError> {
        self.evaluation
            .run(|| {
                tracing::debug!(app = %self.name, "resolving application");
                self.apps
                    .read(&self.name)
                    .map_err(|e| RequirementError::Unresolved(e.to_string()))
            })
            .map(|_| ())
    }

    fn state(&self) -> RequirementState {
        self.evaluation.state()
    }
}
