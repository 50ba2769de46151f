//! `stratus set-env` — Set an env variable for an app.

use std::rc::Rc;

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use stratus_api::models::AppParams;
use stratus_api::repository::ApplicationRepository;
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args, target_phrase};
use crate::requirements::{ApplicationRequirement, Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `set-env` command.
#[derive(Args, Debug)]
pub struct SetEnvArgs {
    /// Application name, variable name and value.
    #[arg(value_name = "APP_NAME ENV_VAR_NAME ENV_VAR_VALUE", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Adds or replaces one user-provided variable.
pub struct SetEnv {
    session: Rc<SessionContext>,
    apps: Rc<dyn ApplicationRepository>,
    app_req: Option<Rc<ApplicationRequirement>>,
}

impl SetEnv {
    /// Creates the command.
    pub fn new(session: Rc<SessionContext>, apps: Rc<dyn ApplicationRepository>) -> Self {
        Self {
            session,
            apps,
            app_req: None,
        }
    }
}

impl Command for SetEnv {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "set-env",
            description: "Set an env variable for an app",
            usage: "stratus set-env APP_NAME ENV_VAR_NAME ENV_VAR_VALUE",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 3)?;
        let app_req = factory.application(&args[0]);
        self.app_req = Some(Rc::clone(&app_req));
        Ok(vec![factory.login(), factory.targeted_space(), app_req])
    }

    fn run(&mut self, args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
        let app = self
            .app_req
            .as_deref()
            .and_then(ApplicationRequirement::application)
            .context("application was not resolved")?;
        let (key, value) = (&args[1], &args[2]);

        ui.say(&format!(
            "Setting env variable '{key}' to '{value}' for app {} {}...",
            app.name,
            target_phrase(&self.session)
        ));
        let mut vars = app.environment_vars.clone();
        let _ = vars.insert(key.clone(), Value::String(value.clone()));
        let params = AppParams {
            environment_vars: Some(vars),
            ..AppParams::default()
        };
        let _ = self.apps.update(&app.guid, &params)?;
        ui.ok();
        ui.say(&format!(
            "TIP: Use 'stratus restage {}' to ensure your env variable changes take effect",
            app.name
        ));
        Ok(())
    }
}
