//! Team command - show a project's team roster.

use anyhow::{Context, Result};
use clap::Args;

use registryx_core::TeamRoster;

use crate::Config;
use crate::client::ApiClient;
use crate::render::TerminalAdapter;

/// Arguments for the team command.
#[derive(Debug, Args)]
pub struct TeamArgs {
    /// Project ID (defaults to the first listed project).
    #[arg(long, short = 'p')]
    pub project: Option<String>,
}

/// Execute the team command.
///
/// # Errors
///
/// Returns an error if the registry cannot be reached or answers with an error.
pub async fn execute(args: TeamArgs, config: &Config) -> Result<()> {
    let client = ApiClient::new(config).context("Failed to create registry client")?;
    let roster = TeamRoster::load(&client, args.project.as_deref())
        .await
        .context("Failed to load team roster")?;

    TerminalAdapter::stdout(config.format).write_roster(&roster)?;
    Ok(())
}
