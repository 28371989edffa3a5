//! CLI subcommands.

pub mod index;
pub mod projects;
pub mod rebuild;
pub mod search;
pub mod shell;
pub mod summary;
pub mod team;
pub mod wbs;

use anyhow::{Context, Result};
use registryx_core::IndexSession;

use crate::Config;
use crate::client::ApiClient;

/// Creates an index session against the configured registry.
///
/// # Errors
///
/// Returns an error if the API client cannot be constructed.
pub fn open_session(config: &Config) -> Result<IndexSession<ApiClient>> {
    let client = ApiClient::new(config).context("Failed to create registry client")?;
    Ok(IndexSession::new(client).with_step_timeout(config.timeout))
}
