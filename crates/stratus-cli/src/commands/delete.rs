//! `stratus delete` — Delete an app.

use std::rc::Rc;

use clap::Args;
use stratus_api::repository::ApplicationRepository;
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args, target_phrase};
use crate::requirements::{Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `delete` command.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Application name.
    #[arg(value_name = "APP_NAME")]
    pub args: Vec<String>,

    /// Force deletion without confirmation.
    #[arg(short, long)]
    pub force: bool,
}

/// Deletes an application and everything that depends on it.
pub struct DeleteApp {
    session: Rc<SessionContext>,
    apps: Rc<dyn ApplicationRepository>,
    force: bool,
}

impl DeleteApp {
    /// Creates the command.
    pub fn new(session: Rc<SessionContext>, apps: Rc<dyn ApplicationRepository>, force: bool) -> Self {
        Self { session, apps, force }
    }
}

impl Command for DeleteApp {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "delete",
            description: "Delete an app",
            usage: "stratus delete APP_NAME [-f]",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 1)?;
        Ok(vec![factory.login(), factory.targeted_space()])
    }

    fn run(&mut self, args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
        let name = &args[0];
        if !self.force && !ui.confirm(&format!("Really delete the app {name}?")) {
            tracing::debug!(app = %name, "deletion declined");
            return Ok(());
        }

        ui.say(&format!("Deleting app {name} {}...", target_phrase(&self.session)));
        let app = match self.apps.read(name) {
            Ok(app) => app,
            Err(err) if err.is_not_found() => {
                ui.ok();
                ui.warn(&format!("App {name} does not exist."));
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        self.apps.delete(&app.guid)?;
        ui.ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Outcome, run_command};
    use crate::requirements::fakes::{FakeAppRepository, FakeOrgRepository};
    use crate::terminal::BufferUi;
    use stratus_api::models::Application;
    use stratus_common::types::{Guid, TargetFields};

    fn run_delete(apps: Rc<FakeAppRepository>, force: bool, ui: &mut BufferUi) -> Outcome {
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
        let mut cmd = DeleteApp::new(session, apps, force);
        run_command(&mut cmd, &factory, &["my-app".to_string()], ui)
    }

    fn repo() -> Rc<FakeAppRepository> {
        Rc::new(FakeAppRepository::with_app(Application {
            guid: Guid::new("my-app-guid"),
            name: "my-app".into(),
            ..Application::default()
        }))
    }

    #[test]
    fn confirmed_delete_removes_the_app() {
        let apps = repo();
        let mut ui = BufferUi::answering(true);

        assert_eq!(run_delete(apps.clone(), false, &mut ui), Outcome::Succeeded);
        assert_eq!(ui.prompts, ["Really delete the app my-app?"]);
        assert_eq!(*apps.deleted.borrow(), [Guid::new("my-app-guid")]);
        assert!(ui.contains_in_order(&[&["Deleting app my-app"], &["OK"]]));
    }

    #[test]
    fn declined_confirmation_does_nothing() {
        let apps = repo();
        let mut ui = BufferUi::answering(false);

        assert_eq!(run_delete(apps.clone(), false, &mut ui), Outcome::Succeeded);
        assert_eq!(apps.reads.get(), 0);
        assert!(apps.deleted.borrow().is_empty());
    }

    #[test]
    fn force_skips_confirmation() {
        let apps = repo();
        let mut ui = BufferUi::answering(false);

        assert_eq!(run_delete(apps.clone(), true, &mut ui), Outcome::Succeeded);
        assert!(ui.prompts.is_empty());
        assert_eq!(apps.deleted.borrow().len(), 1);
    }

    #[test]
    fn missing_app_is_a_warning_not_a_failure() {
        let apps = Rc::new(FakeAppRepository::default());
        let mut ui = BufferUi::new();

        assert_eq!(run_delete(apps.clone(), true, &mut ui), Outcome::Succeeded);
        assert!(apps.deleted.borrow().is_empty());
        assert!(ui.contains_in_order(&[&["OK"], &["my-app", "does not exist"]]));
        assert!(!ui.contains(&["FAILED"]));
    }
}
