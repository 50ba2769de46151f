//! CLI command definitions and dispatch.
//!
//! Every verb implements [`Command`]: it declares its metadata, turns its
//! arguments into an ordered requirement list (failing fast on malformed
//! arguments), and only runs once every requirement holds. [`run_command`]
//! drives that pipeline and renders failures.

pub mod create_app;
pub mod delete;
pub mod env;
pub mod org;
pub mod orgs;
pub mod restage;
pub mod set_env;
pub mod target;
pub mod unset_env;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use stratus_api::gateway::Gateway;
use stratus_api::repository::{
    ApplicationRepository, CloudControllerApplicationRepository, CloudControllerOrganizationRepository,
    OrganizationRepository,
};
use stratus_common::config::SessionContext;

use crate::requirements::{self, Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Stratus — command-line client for the application platform control plane.
#[derive(Parser, Debug)]
#[command(name = stratus_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: CliCommand,

    /// Path to the config file holding the session.
    #[arg(long, global = true, env = "STRATUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Show all env variables for an app.
    Env(env::EnvArgs),
    /// Show org info.
    Org(org::OrgArgs),
    /// List all orgs.
    Orgs(orgs::OrgsArgs),
    /// Set the targeted org and space.
    Target(target::TargetArgs),
    /// Create an app in the targeted space.
    CreateApp(create_app::CreateAppArgs),
    /// Set an env variable for an app.
    SetEnv(set_env::SetEnvArgs),
    /// Remove an env variable from an app.
    UnsetEnv(unset_env::UnsetEnvArgs),
    /// Restage an app.
    Restage(restage::RestageArgs),
    /// Delete an app.
    Delete(delete::DeleteArgs),
}

/// Static description of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMetadata {
    /// Verb typed by the user.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Usage line.
    pub usage: &'static str,
}

/// Malformed command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// Wrong number of positional arguments.
    #[error("expected {expected} argument(s), got {got}")]
    ArgumentCount {
        /// Number the command takes.
        expected: usize,
        /// Number given.
        got: usize,
    },

    /// A flag value could not be parsed.
    #[error("invalid value '{value}' for {flag}")]
    InvalidFlag {
        /// Flag name.
        flag: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A flag the command cannot run without was not given.
    #[error("missing required flag {flag}")]
    MissingFlag {
        /// Flag name.
        flag: &'static str,
    },
}

/// A user-facing verb.
pub trait Command {
    /// Name, description and usage.
    fn metadata(&self) -> CommandMetadata;

    /// Builds the ordered requirement list for `args`.
    ///
    /// # Errors
    ///
    /// Returns a usage error when the arguments have the wrong count or shape.
    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError>;

    /// Performs the command. Only called once every requirement holds.
    ///
    /// # Errors
    ///
    /// Returns any repository failure; the caller renders it.
    fn run(&mut self, args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()>;
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran to completion.
    Succeeded,
    /// The arguments were malformed; nothing was evaluated.
    IncorrectUsage,
    /// A requirement did not hold; the command did not run.
    RequirementFailed,
    /// The command ran and failed.
    Failed,
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Succeeded => ExitCode::SUCCESS,
            Self::IncorrectUsage | Self::RequirementFailed | Self::Failed => ExitCode::FAILURE,
        }
    }
}

/// Session, config location and repositories shared by every command of
/// one invocation.
pub struct Dependencies {
    session: Rc<SessionContext>,
    config_path: PathBuf,
    apps: Rc<dyn ApplicationRepository>,
    orgs: Rc<dyn OrganizationRepository>,
}

impl Dependencies {
    /// Wires the control plane repositories over `gateway`.
    pub fn new(session: Rc<SessionContext>, config_path: &Path, gateway: Rc<dyn Gateway>) -> Self {
        let apps = Rc::new(CloudControllerApplicationRepository::new(
            Rc::clone(&session),
            Rc::clone(&gateway),
        ));
        let orgs = Rc::new(CloudControllerOrganizationRepository::new(Rc::clone(&session), gateway));
        Self {
            session,
            config_path: config_path.to_path_buf(),
            apps,
            orgs,
        }
    }

    /// Requirement factory over the same session and repositories.
    pub fn requirement_factory(&self) -> RequirementFactory {
        RequirementFactory::new(Rc::clone(&self.session), Rc::clone(&self.apps), Rc::clone(&self.orgs))
    }
}

impl CliCommand {
    /// Builds the command object and its positional arguments.
    pub fn into_command(self, deps: &Dependencies) -> (Box<dyn Command>, Vec<String>) {
        let session = Rc::clone(&deps.session);
        let apps = Rc::clone(&deps.apps);
        match self {
            Self::Env(args) => (Box::new(env::Env::new(session, apps)), args.args),
            Self::Org(args) => (Box::new(org::ShowOrg::new(session)), args.args),
            Self::Orgs(args) => (Box::new(orgs::ListOrgs::new(session, Rc::clone(&deps.orgs))), args.args),
            Self::Target(args) => {
                let positional = args.args.clone();
                let config_path = deps.config_path.clone();
                (Box::new(target::Target::new(session, config_path, args)), positional)
            }
            Self::CreateApp(args) => {
                let positional = args.args.clone();
                (Box::new(create_app::CreateApp::new(session, apps, args)), positional)
            }
            Self::SetEnv(args) => (Box::new(set_env::SetEnv::new(session, apps)), args.args),
            Self::UnsetEnv(args) => (Box::new(unset_env::UnsetEnv::new(session, apps)), args.args),
            Self::Restage(args) => (Box::new(restage::Restage::new(session, apps)), args.args),
            Self::Delete(args) => (Box::new(delete::DeleteApp::new(session, apps, args.force)), args.args),
        }
    }
}

/// Dispatches the parsed CLI command through the requirement pipeline.
pub fn execute(command: CliCommand, deps: &Dependencies, ui: &mut dyn Ui) -> Outcome {
    let (mut command, args) = command.into_command(deps);
    run_command(command.as_mut(), &deps.requirement_factory(), &args, ui)
}

/// Builds requirements, evaluates them in order, then runs the command.
pub fn run_command(
    command: &mut dyn Command,
    factory: &RequirementFactory,
    args: &[String],
    ui: &mut dyn Ui,
) -> Outcome {
    let metadata = command.metadata();
    tracing::info!(command = metadata.name, description = metadata.description, ?args, "running command");

    let reqs = match command.requirements(factory, args) {
        Ok(reqs) => reqs,
        Err(err) => {
            tracing::debug!(command = metadata.name, error = %err, "incorrect usage");
            ui.failed_with_usage(metadata.usage, &err.to_string());
            return Outcome::IncorrectUsage;
        }
    };

    if let Err(err) = requirements::evaluate_all(&reqs) {
        ui.failed_requirement(metadata.name, &err.to_string());
        return Outcome::RequirementFailed;
    }

    match command.run(args, ui) {
        Ok(()) => Outcome::Succeeded,
        Err(err) => {
            tracing::debug!(command = metadata.name, error = ?err, "command failed");
            ui.failed(&format!("{err:#}"));
            Outcome::Failed
        }
    }
}

/// Fails unless exactly `expected` positional arguments were given.
///
/// # Errors
///
/// Returns [`UsageError::ArgumentCount`].
pub fn expect_args(args: &[String], expected: usize) -> Result<(), UsageError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(UsageError::ArgumentCount {
            expected,
            got: args.len(),
        })
    }
}

/// Renders "in org ORG / space SPACE as USER".
pub fn target_phrase(session: &SessionContext) -> String {
    let org = session.organization().map_or("", |o| o.name.as_str());
    let space = session.space().map_or("", |s| s.name.as_str());
    format!("in org {org} / space {space} as {}", session.username())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::requirements::RequirementError;
    use crate::requirements::fakes::{FakeAppRepository, FakeOrgRepository, FixedRequirement};
    use crate::terminal::BufferUi;
    use stratus_common::types::TargetFields;

    struct StubCommand {
        reqs: Vec<Rc<dyn Requirement>>,
        arity: usize,
        fail_with: Option<&'static str>,
        runs: Cell<usize>,
    }

    impl Command for StubCommand {
        fn metadata(&self) -> CommandMetadata {
            CommandMetadata {
                name: "stub",
                description: "Exercise the pipeline",
                usage: "stratus stub ARG",
            }
        }

        fn requirements(
            &mut self,
            _factory: &RequirementFactory,
            args: &[String],
        ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
            expect_args(args, self.arity)?;
            Ok(self.reqs.clone())
        }

        fn run(&mut self, _args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
            self.runs.set(self.runs.get() + 1);
            match self.fail_with {
                Some(message) => anyhow::bail!(message),
                None => {
                    ui.ok();
                    Ok(())
                }
            }
        }
    }

    fn factory() -> RequirementFactory {
        RequirementFactory::new(
            Rc::new(SessionContext::default()),
            Rc::new(FakeAppRepository::default()),
            Rc::new(FakeOrgRepository::default()),
        )
    }

    fn stub(reqs: Vec<Rc<dyn Requirement>>) -> StubCommand {
        StubCommand {
            reqs,
            arity: 1,
            fail_with: None,
            runs: Cell::new(0),
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn wrong_argument_count_is_incorrect_usage() {
        let gate = Rc::new(FixedRequirement::passing());
        let mut cmd = stub(vec![gate.clone()]);
        let mut ui = BufferUi::new();

        let outcome = run_command(&mut cmd, &factory(), &args(&[]), &mut ui);

        assert_eq!(outcome, Outcome::IncorrectUsage);
        assert!(ui.usage_failed);
        assert!(ui.contains_in_order(&[&["FAILED"], &["Incorrect Usage."], &["stratus stub ARG"]]));
        assert_eq!(gate.calls.get(), 0);
        assert_eq!(cmd.runs.get(), 0);
    }

    #[test]
    fn failed_requirement_prevents_run() {
        let mut cmd = stub(vec![Rc::new(FixedRequirement::failing(RequirementError::NoTargetedSpace))]);
        let mut ui = BufferUi::new();

        let outcome = run_command(&mut cmd, &factory(), &args(&["x"]), &mut ui);

        assert_eq!(outcome, Outcome::RequirementFailed);
        assert!(ui.requirement_failed);
        assert!(ui.contains_in_order(&[
            &["FAILED"],
            &["Cannot run 'stub': precondition not met."],
            &["No space targeted"],
        ]));
        assert_eq!(cmd.runs.get(), 0);
    }

    #[test]
    fn run_error_is_rendered_as_failed() {
        let mut cmd = stub(vec![Rc::new(FixedRequirement::passing())]);
        cmd.fail_with = Some("App my-app not found");
        let mut ui = BufferUi::new();

        let outcome = run_command(&mut cmd, &factory(), &args(&["x"]), &mut ui);

        assert_eq!(outcome, Outcome::Failed);
        assert!(!ui.requirement_failed);
        assert!(!ui.contains(&["precondition not met"]));
        assert!(ui.contains_in_order(&[&["FAILED"], &["App my-app not found"]]));
    }

    #[test]
    fn satisfied_requirements_run_once() {
        let mut cmd = stub(vec![Rc::new(FixedRequirement::passing())]);
        let mut ui = BufferUi::new();

        assert_eq!(run_command(&mut cmd, &factory(), &args(&["x"]), &mut ui), Outcome::Succeeded);
        assert_eq!(cmd.runs.get(), 1);
        assert_eq!(ui.outputs, ["OK"]);
    }

    #[test]
    fn target_phrase_names_org_space_and_user() {
        let session = SessionContext::new("https://api.example.com")
            .with_username("my-user")
            .with_organization(TargetFields::new("org-guid", "my-org"))
            .with_space(TargetFields::new("space-guid", "my-space"));
        assert_eq!(target_phrase(&session), "in org my-org / space my-space as my-user");
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["stratus", "env", "my-app", "--verbose", "--config", "/tmp/c.json"])
            .expect("parse");
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert!(matches!(cli.command, CliCommand::Env(ref a) if a.args == ["my-app"]));
    }

    #[test]
    fn cli_parses_target_flags() {
        let cli = Cli::try_parse_from(["stratus", "target", "-o", "my-org", "-s", "my-space"]).expect("parse");
        assert!(matches!(
            cli.command,
            CliCommand::Target(ref a) if a.org.as_deref() == Some("my-org") && a.space.as_deref() == Some("my-space")
        ));
    }

    #[test]
    fn cli_accepts_kebab_case_verbs() {
        let cli = Cli::try_parse_from(["stratus", "unset-env", "my-app", "KEY"]).expect("parse");
        assert!(matches!(cli.command, CliCommand::UnsetEnv(_)));
    }
}
