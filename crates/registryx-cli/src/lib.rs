//! # registryx-cli
//!
//! Command-line client for the registryx search index and team roster.
//!
//! ## Commands
//!
//! - `registryx index` - Show the size of the current index
//! - `registryx rebuild` - Rebuild the remote index and reload it
//! - `registryx search` - Search the index
//! - `registryx projects` - List registry projects by family
//! - `registryx summary` - Count projects by family, channel, category, status and completion
//! - `registryx team` - Show a project's team roster
//! - `registryx wbs` - Show a project's work breakdown
//! - `registryx shell` - Interactive search session
//!
//! ## Configuration
//!
//! The CLI uses environment variables or command-line flags for settings:
//!
//! - `REGISTRYX_BASE_URL` - Registry endpoint (default: `http://localhost:8000`)
//! - `REGISTRYX_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod client;
pub mod commands;
pub mod render;

use std::time::Duration;

use clap::{Parser, Subcommand};

/// registryx CLI - search index and team roster client.
#[derive(Debug, Parser)]
#[command(name = "registryx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registry service base URL.
    #[arg(long, env = "REGISTRYX_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Timeout for each registry request, in seconds.
    #[arg(long, env = "REGISTRYX_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Output format.
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Log output format (logs go to stderr; filter with `RUST_LOG`).
    #[arg(long, default_value = "pretty")]
    pub log_format: LogOutput,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            format: self.format,
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the index and show its reported size.
    Index(commands::index::IndexArgs),
    /// Rebuild the remote index and reload it.
    Rebuild(commands::rebuild::RebuildArgs),
    /// Search the index.
    Search(commands::search::SearchArgs),
    /// List registry projects by family.
    Projects(commands::projects::ProjectsArgs),
    /// Count projects by family, channel, category, status and completion.
    Summary(commands::summary::SummaryArgs),
    /// Show a project's team roster.
    Team(commands::team::TeamArgs),
    /// Show a project's work breakdown.
    Wbs(commands::wbs::WbsArgs),
    /// Interactive search session.
    Shell(commands::shell::ShellArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Table output.
    Table,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogOutput {
    /// Human-readable log lines.
    #[default]
    Pretty,
    /// JSON log lines.
    Json,
}

impl From<LogOutput> for registryx_core::LogFormat {
    fn from(value: LogOutput) -> Self {
        match value {
            LogOutput::Pretty => Self::Pretty,
            LogOutput::Json => Self::Json,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry service base URL.
    pub base_url: String,
    /// Timeout for each registry request.
    pub timeout: Duration,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: registryx_core::DEFAULT_STEP_TIMEOUT,
            format: OutputFormat::Text,
        }
    }
}
