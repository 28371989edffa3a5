//! Rebuild command - regenerate the remote index and reload it.

use anyhow::{Context, Result};
use clap::Args;

use registryx_core::PresentationAdapter;

use crate::Config;
use crate::render::TerminalAdapter;

/// Arguments for the rebuild command.
#[derive(Debug, Args)]
pub struct RebuildArgs {}

/// Execute the rebuild command.
///
/// # Errors
///
/// Returns an error if either the build request or the follow-up fetch fails.
pub async fn execute(_args: RebuildArgs, config: &Config) -> Result<()> {
    let session = super::open_session(config)?;
    let loaded = session
        .rebuild_and_refresh()
        .await
        .context("Index rebuild failed")?;

    TerminalAdapter::stdout(config.format).show_count(loaded.count);
    Ok(())
}
