//! `stratus orgs` — List all orgs.

use std::rc::Rc;

use clap::Args;
use stratus_api::repository::OrganizationRepository;
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args};
use crate::requirements::{Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `orgs` command.
#[derive(Args, Debug)]
pub struct OrgsArgs {
    /// Unexpected extra arguments, rejected as incorrect usage.
    #[arg(hide = true)]
    pub args: Vec<String>,
}

/// Lists every organization visible to the user.
pub struct ListOrgs {
    session: Rc<SessionContext>,
    orgs: Rc<dyn OrganizationRepository>,
}

impl ListOrgs {
    /// Creates the command.
    pub fn new(session: Rc<SessionContext>, orgs: Rc<dyn OrganizationRepository>) -> Self {
        Self { session, orgs }
    }
}

impl Command for ListOrgs {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "orgs",
            description: "List all orgs",
            usage: "stratus orgs",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 0)?;
        Ok(vec![factory.login()])
    }

    fn run(&mut self, _args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
        ui.say(&format!("Getting orgs as {}...", self.session.username()));
        let orgs = self.orgs.list_orgs()?;
        ui.ok();
        ui.say("");

        if orgs.is_empty() {
            ui.say("No orgs found");
            return Ok(());
        }
        ui.say("name");
        for org in &orgs {
            ui.say(&org.name);
        }
        Ok(())
    }
}
