//! `stratus org` — Show org info.

use std::rc::Rc;

use anyhow::Context;
use clap::Args;
use stratus_api::models::{Organization, QuotaDefinition};
use stratus_common::config::SessionContext;

use super::{Command, CommandMetadata, UsageError, expect_args};
use crate::output;
use crate::requirements::{OrganizationRequirement, Requirement, RequirementFactory};
use crate::terminal::Ui;

/// Arguments for the `org` command.
#[derive(Args, Debug)]
pub struct OrgArgs {
    /// Organization name.
    #[arg(value_name = "ORG")]
    pub args: Vec<String>,
}

/// Shows domains, quota and spaces of one organization.
pub struct ShowOrg {
    session: Rc<SessionContext>,
    org_req: Option<Rc<OrganizationRequirement>>,
}

impl ShowOrg {
    /// Creates the command.
    pub const fn new(session: Rc<SessionContext>) -> Self {
        Self { session, org_req: None }
    }
}

impl Command for ShowOrg {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "org",
            description: "Show org info",
            usage: "stratus org ORG",
        }
    }

    fn requirements(
        &mut self,
        factory: &RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Rc<dyn Requirement>>, UsageError> {
        expect_args(args, 1)?;
        let org_req = factory.organization(&args[0]);
        self.org_req = Some(Rc::clone(&org_req));
        Ok(vec![factory.login(), org_req])
    }

    fn run(&mut self, _args: &[String], ui: &mut dyn Ui) -> anyhow::Result<()> {
        let org = self
            .org_req
            .as_deref()
            .and_then(OrganizationRequirement::organization)
            .context("organization was not resolved")?;

        ui.say(&format!(
            "Getting info for org {} as {}...",
            org.name,
            self.session.username()
        ));
        ui.ok();
        ui.say("");
        for line in render_org(org) {
            ui.say(&line);
        }
        Ok(())
    }
}

/// Renders the organization block.
pub fn render_org(org: &Organization) -> Vec<String> {
    let domains: Vec<_> = org.domains.iter().map(|d| d.name.as_str()).collect();
    let spaces: Vec<_> = org.spaces.iter().map(|s| s.name.as_str()).collect();
    let quota = org
        .quota_definition
        .as_ref()
        .map_or_else(|| "none".to_string(), quota_summary);
    vec![
        format!("{}:", org.name),
        format!("  {}", output::row("domains", &domains.join(", "))),
        format!("  {}", output::row("quota", &quota)),
        format!("  {}", output::row("spaces", &spaces.join(", "))),
    ]
}

fn quota_summary(quota: &QuotaDefinition) -> String {
    format!(
        "{} ({}M memory limit, {} routes, {} services, paid services {})",
        quota.name,
        quota.memory_limit,
        output::format_limit(quota.routes_limit),
        output::format_limit(quota.services_limit),
        output::allowed(quota.non_basic_services_allowed)
    )
}
