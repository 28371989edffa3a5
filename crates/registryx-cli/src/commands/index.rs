//! Index command - fetch the index and show its size.

use anyhow::{Context, Result};
use clap::Args;

use registryx_core::PresentationAdapter;

use crate::render::TerminalAdapter;
use crate::{Config, OutputFormat};

/// Arguments for the index command.
#[derive(Debug, Args)]
pub struct IndexArgs {}

/// Execute the index command.
///
/// # Errors
///
/// Returns an error if the registry cannot be reached or answers with an error.
pub async fn execute(_args: IndexArgs, config: &Config) -> Result<()> {
    let session = super::open_session(config)?;
    let loaded = session
        .refresh()
        .await
        .context("Failed to fetch index")?;

    let mut adapter = TerminalAdapter::stdout(config.format);
    adapter.show_count(loaded.count);
    // The reported count may exceed what one page carries.
    if config.format == OutputFormat::Text {
        adapter.line(&format!("Documents received: {}", loaded.len()))?;
    }
    Ok(())
}
