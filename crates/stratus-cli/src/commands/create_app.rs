//! `stratus create-app` — Create an app in the targeted space.

use std::rc::Rc;

use clap::Args;
use stratus_api::models::{AppParams, Application};
use stratus_api::repository::ApplicationRepository;
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args, target_phrase};
use crate::output;
use crate::requirements::{Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `create-app` command.
#[derive(Args, Debug, Clone, Default)]
pub struct CreateAppArgs {
    /// Application name.
    #[arg(value_name = "APP_NAME")]
    pub args: Vec<String>,

    /// Memory limit (e.g. 256M, 1G).
    #[arg(short, long)]
    pub memory: Option<String>,

    /// Number of instances.
    #[arg(short, long)]
    pub instances: Option<u32>,

    /// Custom buildpack by name or Git URL.
    #[arg(short, long)]
    pub buildpack: Option<String>,

    /// Startup command.
    #[arg(short, long)]
    pub command: Option<String>,

    /// Application health check type (e.g. port, process).
    #[arg(long)]
    pub health_check_type: Option<String>,
}

/// Creates an application from flags.
pub struct CreateApp {
    session: Rc<SessionContext>,
    apps: Rc<dyn ApplicationRepository>,
    flags: CreateAppArgs,
    memory: Option<u64>,
}

impl CreateApp {
    /// Creates the command with the parsed flags.
    pub fn new(session: Rc<SessionContext>, apps: Rc<dyn ApplicationRepository>, flags: CreateAppArgs) -> Self {
        Self {
            session,
            apps,
            flags,
            memory: None,
        }
    }

    fn params(&self, name: &str) -> AppParams {
        AppParams {
            name: Some(name.to_string()),
            space_guid: self.session.space().map(|s| s.guid.clone()),
            instances: self.flags.instances,
            memory: self.memory,
            buildpack: self.flags.buildpack.clone(),
            command: self.flags.command.clone(),
            health_check_type: self.flags.health_check_type.clone(),
            ..AppParams::default()
        }
    }
}

impl Command for CreateApp {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "create-app",
            description: "Create an app in the targeted space",
            usage: "stratus create-app APP_NAME [-m MEMORY] [-i INSTANCES] [-b BUILDPACK] [-c COMMAND] [--health-check-type TYPE]",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 1)?;
        if let Some(raw) = &self.flags.memory {
            let megabytes = output::parse_megabytes(raw).ok_or_else(|| UsageError::InvalidFlag {
                flag: "--memory",
                value: raw.clone(),
            })?;
            self.memory = Some(megabytes);
        }
        if self.flags.instances == Some(0) {
            return Err(UsageError::InvalidFlag {
                flag: "--instances",
                value: "0".to_string(),
            });
        }
        Ok(vec![factory.login(), factory.targeted_space()])
    }

    fn run(&mut self, args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
        let name = &args[0];
        ui.say(&format!("Creating app {name} {}...", target_phrase(&self.session)));
        let app = self.apps.create(&self.params(name))?;
        ui.ok();
        ui.say("");
        for line in render_summary(&app) {
            ui.say(&line);
        }
        Ok(())
    }
}

/// Renders the created application's key attributes.
pub fn render_summary(app: &Application) -> Vec<String> {
    let mut lines = vec![
        output::row("name", &app.name),
        output::row("guid", app.guid.as_str()),
        output::row("instances", &app.instances.to_string()),
        output::row("memory", &output::format_megabytes(app.memory)),
    ];
    if let Some(state) = &app.state {
        lines.push(output::row("state", state));
    }
    if let Some(buildpack) = &app.buildpack {
        lines.push(output::row("buildpack", buildpack));
    }
    lines
}
