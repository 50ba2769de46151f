//! A space is targeted.

use std::rc::Rc;

use stratus_common::config::SessionContext;

use super::{Evaluation, Requirement, RequirementError, RequirementState};

/// Satisfied when the session targets a space with a GUID.
pub struct TargetedSpaceRequirement {
    session: Rc<SessionContext>,
    evaluation: Evaluation<()>,
}

impl TargetedSpaceRequirement {
    /// Creates the requirement for a session.
    pub fn new(session: Rc<SessionContext>) -> Self {
        Self {
            session,
            evaluation: Evaluation::default(),
        }
    }
}

impl Requirement for TargetedSpaceRequirement {
    fn name(&self) -> &'static str {
        "targeted-space"
    }

    fn execute(&self) -> Result<(), RequirementError> {
        self.evaluation
            .run(|| match self.session.space() {
                Some(space) if !space.guid.is_empty() => Ok(()),
                _ => Err(RequirementError::NoTargetedSpace),
            })
            .map(|_| ())
    }

    fn state(&self) -> RequirementState {
        self.evaluation.state()
    }
}
