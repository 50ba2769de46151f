//! Requirement layer: preconditions a command declares before it runs.
//!
//! A requirement is evaluated at most once. [`evaluate_all`] walks a
//! command's list in declaration order and stops at the first failure, so
//! later requirements (and the API calls they would make) never happen.

pub mod application;
pub mod login;
pub mod organization;
pub mod space;

use std::cell::OnceCell;
use std::rc::Rc;

use stratus_api::repository::{ApplicationRepository, OrganizationRepository};
use stratus_common::config::SessionContext;

pub use application::ApplicationRequirement;
pub use login::LoginRequirement;
pub use organization::OrganizationRequirement;
pub use space::TargetedSpaceRequirement;

/// Why a precondition does not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequirementError {
    /// No API endpoint or access token in the session.
    #[error("Not logged in. Set an API endpoint and access token in the stratus config file.")]
    NotLoggedIn,

    /// The session has no targeted space.
    #[error("No space targeted. Use 'stratus target -o ORG -s SPACE' to target a space.")]
    NoTargetedSpace,

    /// Resolving a named entity failed.
    #[error("{0}")]
    Unresolved(String),
}

/// Lifecycle of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementState {
    /// Not evaluated yet.
    Unevaluated,
    /// Evaluated and holds.
    Satisfied,
    /// Evaluated and does not hold.
    Failed,
}

/// A precondition checked before a command runs.
pub trait Requirement {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Evaluates the requirement. Repeated calls return the first outcome.
    ///
    /// # Errors
    ///
    /// Returns why the precondition does not hold.
    fn execute(&self) -> Result<(), RequirementError>;

    /// Current state.
    fn state(&self) -> RequirementState;
}

/// Memoized outcome of a requirement that produces a value.
#[derive(Debug)]
pub struct Evaluation<T> {
    outcome: OnceCell<Result<T, RequirementError>>,
}

impl<T> Default for Evaluation<T> {
    fn default() -> Self {
        Self {
            outcome: OnceCell::new(),
        }
    }
}

impl<T> Evaluation<T> {
    /// Runs `check` the first time; later calls replay its outcome.
    ///
    /// # Errors
    ///
    /// Returns the failure `check` produced.
    pub fn run(&self, check: impl FnOnce() -> Result<T, RequirementError>) -> Result<&T, RequirementError> {
        self.outcome.get_or_init(check).as_ref().map_err(Clone::clone)
    }

    /// Value produced by a successful evaluation.
    pub fn value(&self) -> Option<&T> {
        self.outcome.get().and_then(|r| r.as_ref().ok())
    }

    /// Current state.
    pub fn state(&self) -> RequirementState {
        match self.outcome.get() {
            None => RequirementState::Unevaluated,
            Some(Ok(_)) => RequirementState::Satisfied,
            Some(Err(_)) => RequirementState::Failed,
        }
    }
}

/// Evaluates `requirements` in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the first failing requirement's error.
pub fn evaluate_all(requirements: &[Rc<dyn Requirement>]) -> Result<(), RequirementError> {
    for requirement in requirements {
        if let Err(err) = requirement.execute() {
            tracing::warn!(requirement = requirement.name(), error = %err, "requirement failed");
            return Err(err);
        }
        tracing::debug!(requirement = requirement.name(), state = ?requirement.state(), "requirement evaluated");
    }
    Ok(())
}

/// Builds requirements bound to the invocation's session and repositories.
pub struct RequirementFactory {
    session: Rc<SessionContext>,
    apps: Rc<dyn ApplicationRepository>,
    orgs: Rc<dyn OrganizationRepository>,
}

impl RequirementFactory {
    /// Creates a factory.
    pub fn new(
        session: Rc<SessionContext>,
        apps: Rc<dyn ApplicationRepository>,
        orgs: Rc<dyn OrganizationRepository>,
    ) -> Self {
        Self { session, apps, orgs }
    }

    /// The user is logged in.
    pub fn login(&self) -> Rc<dyn Requirement> {
        Rc::new(LoginRequirement::new(Rc::clone(&self.session)))
    }

    /// A space is targeted.
    pub fn targeted_space(&self) -> Rc<dyn Requirement> {
        Rc::new(TargetedSpaceRequirement::new(Rc::clone(&self.session)))
    }

    /// The organization `name` exists; keeps the resolved organization.
    pub fn organization(&self, name: &str) -> Rc<OrganizationRequirement> {
        Rc::new(OrganizationRequirement::new(name, Rc::clone(&self.orgs)))
    }

    /// The application `name` exists in the targeted space; keeps it.
    pub fn application(&self, name: &str) -> Rc<ApplicationRequirement> {
        Rc::new(ApplicationRequirement::new(name, Rc::clone(&self.apps)))
    }
}
