//! The user is logged in.

use std::rc::Rc;

use stratus_common::config::SessionContext;

use super::{Evaluation, Requirement, RequirementError, RequirementState};

/// Satisfied when the session carries an API endpoint and an access token.
pub struct LoginRequirement {
    session: Rc<SessionContext>,
    evaluation: Evaluation<()>,
}

impl LoginRequirement {
    /// Creates the requirement for a session.
    pub fn new(session: Rc<SessionContext>) -> Self {
        Self {
            session,
            evaluation: Evaluation::default(),
        }
    }
}

impl Requirement for LoginRequirement {
    fn name(&self) -> &'static str {
        "login"
    }

    fn execute(&self) -> Result<(), RequirementError> {
        self.evaluation
            .run(|| {
                if self.session.is_logged_in() {
                    Ok(())
                } else {
                    Err(RequirementError::NotLoggedIn)
                }
            })
            .map(|_| ())
    }

    fn state(&self) -> RequirementState {
        self.evaluation.state()
    }
}
