//! `stratus restage` — Restage an app.

use std::rc::Rc;

use anyhow::Context;
use clap::Args;
use stratus_api::repository::ApplicationRepository;
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args, target_phrase};
use crate::requirements::{ApplicationRequirement, Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `restage` command.
#[derive(Args, Debug)]
pub struct RestageArgs {
    /// Application name.
    #[arg(value_name = "APP_NAME")]
    pub args: Vec<String>,
}

/// Requests a restage. Returns once the request is accepted.
pub struct Restage {
    session: Rc<SessionContext>,
    apps: Rc<dyn ApplicationRepository>,
    app_req: Option<Rc<ApplicationRequirement>>,
}

impl Restage {
    /// Creates the command.
    pub fn new(session: Rc<SessionContext>, apps: Rc<dyn ApplicationRepository>) -> Self {
        Self {
            session,
            apps,
            app_req: None,
        }
    }
}

impl Command for Restage {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "restage",
            description: "Restage an app",
            usage: "stratus restage APP_NAME",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 1)?;
        let app_req = factory.application(&args[0]);
        self.app_req = Some(Rc::clone(&app_req));
        Ok(vec![factory.login(), factory.targeted_space(), app_req])
    }

    fn run(&mut self, _args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
        let app = self
            .app_req
            .as_deref()
            .and_then(ApplicationRequirement::application)
            .context("application was not resolved")?;

        ui.say(&format!("Restaging app {} {}...", app.name, target_phrase(&self.session)));
        self.apps.create_restage_request(&app.guid)?;
        ui.ok();
        Ok(())
    }
}
