//! `stratus unset-env` — Remove an env variable from an app.

use std::rc::Rc;

use anyhow::Context;
use clap::Args;
use stratus_api::models::AppParams;
use stratus_api::repository::ApplicationRepository;
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args, target_phrase};
use crate::requirements::{ApplicationRequirement, Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `unset-env` command.
#[derive(Args, Debug)]
pub struct UnsetEnvArgs {
    /// Application name and variable name.
    #[arg(value_name = "APP_NAME ENV_VAR_NAME")]
    pub args: Vec<String>,
}

/// Removes one user-provided variable.
pub struct UnsetEnv {
    session: Rc<SessionContext>,
    apps: Rc<dyn ApplicationRepository>,
    app_req: Option<Rc<ApplicationRequirement>>,
}

impl UnsetEnv {
    /// Creates the command.
    pub fn new(session: Rc<SessionContext>, apps: Rc<dyn ApplicationRepository>) -> Self {
        Self {
            session,
            apps,
            app_req: None,
        }
    }
}

impl Command for UnsetEnv {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "unset-env",
            description: "Remove an env variable from an app",
            usage: "stratus unset-env APP_NAME ENV_VAR_NAME",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 2)?;
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
        let key = &args[1];

        ui.say(&format!(
            "Removing env variable {key} from app {} {}...",
            app.name,
            target_phrase(&self.session)
        ));
        let mut vars = app.environment_vars.clone();
        if vars.remove(key).is_none() {
            ui.ok();
            ui.warn(&format!("Env variable {key} was not set."));
            return Ok(());
        }

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

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::commands::{Outcome, run_command};
    use crate::requirements::fakes::{FakeAppRepository, FakeOrgRepository};
    use crate::terminal::BufferUi;
    use serde_json::json;
    use stratus_api::models::Application;
    use stratus_common::types::{Guid, TargetFields};

    fn app_with_vars() -> Rc<FakeAppRepository> {
        Rc::new(FakeAppRepository::with_app(Application {
            guid: Guid::new("my-app-guid"),
            name: "my-app".into(),
            environment_vars: BTreeMap::from([
                ("foo".to_string(), json!("bar")),
                ("PORT".to_string(), json!(8080)),
                ("DATABASE_URL".to_string(), json!("mysql://example.com/my-db")),
            ]),
            ..Application::default()
        }))
    }

    fn run_unset_env(apps: Rc<FakeAppRepository>, args: &[&str]) -> (Outcome, BufferUi) {
        let session = Rc::new(
            SessionContext::new("https://api.example.com")
                .with_access_token("token")
                .with_space(TargetFields::new("space-guid", "my-space")),
        );
        let factory = RequirementFactory::new(
            Rc::clone(&session),
            apps.clone(),
            Rc::new(FakeOrgRepository::default()),
        );
        let mut cmd = UnsetEnv::new(session, apps);
        let mut ui = BufferUi::new();
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let outcome = run_command(&mut cmd, &factory, &args, &mut ui);
        (outcome, ui)
    }

    #[test]
    fn removes_only_the_named_variable() {
        let apps = app_with_vars();
        let (outcome, ui) = run_unset_env(apps.clone(), &["my-app", "DATABASE_URL"]);

        assert_eq!(outcome, Outcome::Succeeded);
        let updated = apps.updated.borrow();
        assert_eq!(
            updated[0].1.environment_vars,
            Some(BTreeMap::from([
                ("PORT".to_string(), json!(8080)),
                ("foo".to_string(), json!("bar")),
            ]))
        );
        assert!(ui.contains_in_order(&[&["Removing env variable DATABASE_URL from app my-app"], &["OK"]]));
    }

    #[test]
    fn unknown_variable_warns_without_update() {
        let apps = app_with_vars();
        let (outcome, ui) = run_unset_env(apps.clone(), &["my-app", "NOPE"]);

        assert_eq!(outcome, Outcome::Succeeded);
        assert!(apps.updated.borrow().is_empty());
        assert!(ui.contains_in_order(&[&["OK"], &["Env variable NOPE was not set."]]));
    }
}
