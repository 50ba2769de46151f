//! `stratus target` — Set the targeted org and space.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Args;
use stratus_api::models::Organization;
use stratus_common::config::{ConfigFile, SessionContext};
use stratus_common::types::TargetFields;

use super::{Command, CommandMetadata, UsageError, expect_args};
use crate::output;
use crate::requirements::{OrganizationRequirement, Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `target` command.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Unexpected extra arguments, rejected as incorrect usage.
    #[arg(hide = true)]
    pub args: Vec<String>,

    /// Organization to target.
    #[arg(short, long)]
    pub org: Option<String>,

    /// Space within the organization to target.
    #[arg(short, long)]
    pub space: Option<String>,
}

/// Resolves an organization (and optionally one of its spaces) and stores
/// it as the target in the config file.
pub struct Target {
    session: Rc<SessionContext>,
    config_path: PathBuf,
    flags: TargetArgs,
    org_req: Option<Rc<OrganizationRequirement>>,
}

impl Target {
    /// Creates the command writing to the config file at `config_path`.
    pub const fn new(session: Rc<SessionContext>, config_path: PathBuf, flags: TargetArgs) -> Self {
        Self {
            session,
            config_path,
            flags,
            org_req: None,
        }
    }

    fn space_in(&self, org: &Organization) -> anyhow::Result<Option<TargetFields>> {
        let Some(name) = self.flags.space.as_deref() else {
            return Ok(None);
        };
        let space = org
            .spaces
            .iter()
            .find(|s| s.name == name)
            .with_context(|| format!("Space {name} not found in org {}", org.name))?;
        Ok(Some(TargetFields {
            guid: space.guid.clone(),
            name: space.name.clone(),
        }))
    }
}

impl Command for Target {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "target",
            description: "Set the targeted org and space",
            usage: "stratus target -o ORG [-s SPACE]",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 0)?;
        let org = self
            .flags
            .org
            .as_deref()
            .ok_or(UsageError::MissingFlag { flag: "--org" })?;
        let org_req = factory.organization(org);
        self.org_req = Some(Rc::clone(&org_req));
        Ok(vec![factory.login(), org_req])
    }

    fn run(&mut self, _args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
        let org = self
            .org_req
            .as_deref()
            .and_then(OrganizationRequirement::organization)
            .context("organization was not resolved")?;

        ui.say(&format!("Targeting org {} as {}...", org.name, self.session.username()));
        let space = self.space_in(org)?;

        let mut config = ConfigFile::load(&self.config_path)
            .with_context(|| format!("failed to load config {}", self.config_path.display()))?;
        config.organization = Some(TargetFields {
            guid: org.guid.clone(),
            name: org.name.clone(),
        });
        config.space = space;
        config
            .save(&self.config_path)
            .with_context(|| format!("failed to save config {}", self.config_path.display()))?;
        tracing::info!(
            org = %org.name,
            space = config.space.as_ref().map(|s| s.name.as_str()),
            config = %self.config_path.display(),
            "target saved"
        );

        ui.ok();
        ui.say("");
        ui.say(&output::row("org", &org.name));
        match &config.space {
            Some(space) => ui.say(&output::row("space", &space.name)),
            None => ui.say(&output::row("space", "none (use 'stratus target -o ORG -s SPACE')")),
        }
        Ok(())
    }
}
