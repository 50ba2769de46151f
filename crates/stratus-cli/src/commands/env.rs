//! `stratus env` — Show all env variables for an app.

use std::collections::HashMap;
use std::rc::Rc;

use clap::Args;
use stratus_api::models::{EnvValue, Environment};
use stratus_api::repository::ApplicationRepository;
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args, target_phrase};
use crate::requirements::{Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `env` command.
#[derive(Args, Debug)]
pub struct EnvArgs {
    /// Application name.
    #[arg(value_name = "APP_NAME")]
    pub args: Vec<String>,
}

/// Shows the four variable groups of an application.
pub struct Env {
    session: Rc<SessionContext>,
    apps: Rc<dyn ApplicationRepository>,
}

impl Env {
    /// Creates the command.
    pub fn new(session: Rc<SessionContext>, apps: Rc<dyn ApplicationRepository>) -> Self {
        Self { session, apps }
    }
}

impl Command for Env {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "env",
            description: "Show all env variables for an app",
            usage: "stratus env APP_NAME",
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
        let app = self.apps.read(name)?;

        ui.say(&format!(
            "Getting env variables for app {} {}...",
            app.name,
            target_phrase(&self.session)
        ));
        let env = self.apps.read_env(&app.guid)?;
        ui.ok();
        ui.say("");

        for line in render_environment(&env) {
            ui.say(&line);
        }
        Ok(())
    }
}

/// Renders the four groups in fixed order.
///
/// System-provided keys are sorted; nested mappings keep the order the
/// server declared them in. The other three groups are sorted by key. An
/// empty group renders a single "not set" line instead of a heading.
pub fn render_environment(env: &Environment) -> Vec<String> {
    let mut lines = Vec::new();

    if env.system.is_empty() {
        lines.push("No system-provided env variables have been set".to_string());
    } else {
        lines.push("System-Provided:".to_string());
        let mut keys: Vec<_> = env.system.keys().collect();
        keys.sort();
        for key in keys {
            render_entry(key, &env.system[key], 0, &mut lines);
        }
    }
    lines.push(String::new());

    render_group(
        &env.environment,
        "User-Provided:",
        "No user-defined env variables have been set",
        &mut lines,
    );
    lines.push(String::new());

    render_group(
        &env.running,
        "Running Environment Variable Groups:",
        "No running env variables have been set",
        &mut lines,
    );
    lines.push(String::new());

    render_group(
        &env.staging,
        "Staging Environment Variable Groups:",
        "No staging env variables have been set",
        &mut lines,
    );

    lines
}

fn render_group(vars: &HashMap<String, String>, heading: &str, empty: &str, lines: &mut Vec<String>) {
    if vars.is_empty() {
        lines.push(empty.to_string());
        return;
    }
    lines.push(heading.to_string());
    let mut entries: Vec<_> = vars.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in entries {
        lines.push(format!("{key}: {value}"));
    }
}

fn render_entry(key: &str, value: &EnvValue, depth: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    match value {
        EnvValue::Map(entries) => {
            lines.push(format!("{pad}{key}: {{"));
            for (k, v) in entries {
                render_entry(k, v, depth + 1, lines);
            }
            lines.push(format!("{pad}}}"));
        }
        EnvValue::List(items) => {
            lines.push(format!("{pad}{key}: ["));
            for item in items {
                render_item(item, depth + 1, lines);
            }
            lines.push(format!("{pad}]"));
        }
        scalar => lines.push(format!("{pad}{key}: {scalar}")),
    }
}

fn render_item(value: &EnvValue, depth: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    match value {
        EnvValue::Map(entries) => {
            lines.push(format!("{pad}{{"));
            for (k, v) in entries {
                render_entry(k, v, depth + 1, lines);
            }
            lines.push(format!("{pad}}}"));
        }
        EnvValue::List(items) => {
            lines.push(format!("{pad}["));
            for item in items {
                render_item(item, depth + 1, lines);
            }
            lines.push(format!("{pad}]"));
        }
        scalar => lines.push(format!("{pad}{scalar}")),
    }
}
