//! WBS command - show a project's work breakdown.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use registryx_core::RegistrySource;

use crate::Config;
use crate::client::ApiClient;
use crate::render::TerminalAdapter;

/// Arguments for the wbs command.
#[derive(Debug, Args)]
pub struct WbsArgs {
    /// Project ID from the registry.
    #[arg(long, short = 'p')]
    pub project: String,
}

/// Execute the wbs command.
///
/// # Errors
///
/// Returns an error if the registry cannot be reached or does not know the project.
pub async fn execute(args: WbsArgs, config: &Config) -> Result<()> {
    let client = ApiClient::new(config).context("Failed to create registry client")?;
    run(&client, &args, &mut TerminalAdapter::stdout(config.format)).await
}

/// Fetches one project's work breakdown and renders it.
///
/// # Errors
///
/// Returns an error if the fetch fails or the output cannot be written.
pub async fn run<S, W>(
    source: &S,
    args: &WbsArgs,
    adapter: &mut TerminalAdapter<W>,
) -> Result<()>
where
    S: RegistrySource + ?Sized,
    W: Write,
{
    let graph = source
        .fetch_wbs(&args.project)
        .await
        .with_context(|| format!("Failed to fetch work breakdown for {}", args.project))?;
    adapter.write_wbs(&graph)?;
    Ok(())
}
