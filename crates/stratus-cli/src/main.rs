//! # stratus — application platform CLI
//!
//! Talks to the control plane API on behalf of the user stored in the
//! local config file: inspects organizations, creates, deletes and restages
//! applications, and manages their environment variables.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

mod commands;
mod output;
mod requirements;
mod terminal;

use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use stratus_api::gateway::HttpGateway;
use stratus_common::config::{ConfigFile, SessionContext};
use stratus_common::constants;
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, Dependencies};
use crate::terminal::{TerminalUi, Ui};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ui = TerminalUi::new();
    let config = cli.config.clone().unwrap_or_else(constants::default_config_file);
    match load_session(&config).and_then(|session| {
        let gateway = Rc::new(HttpGateway::new(&session).context("failed to build HTTP client")?);
        Ok(Dependencies::new(session, &config, gateway))
    }) {
        Ok(deps) => commands::execute(cli.command, &deps, &mut ui).exit_code(),
        Err(err) => {
            ui.failed(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_session(path: &Path) -> anyhow::Result<Rc<SessionContext>> {
    let file = ConfigFile::load(path).with_context(|| format!("failed to load config {}", path.display()))?;
    let session = file.into_session();
    tracing::debug!(
        config = %path.display(),
        endpoint = session.api_endpoint(),
        logged_in = session.is_logged_in(),
        "session loaded"
    );
    Ok(Rc::new(session))
}
