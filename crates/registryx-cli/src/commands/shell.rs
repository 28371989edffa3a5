//! Shell command - interactive search over a session-held index.
//!
//! Every line is a search unless it starts with `:`. Failures are shown and
//! the session keeps its previous index.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use registryx_core::{IndexSession, PresentationAdapter, RegistrySource};

use crate::render::TerminalAdapter;
use crate::{Config, OutputFormat};

const HELP: &str = "\
Type text to search document names and bodies.
  :build   rebuild the remote index and reload it
  :count   show the size of the loaded index
  :help    show this help
  :quit    leave the shell";

/// Arguments for the shell command.
#[derive(Debug, Args)]
pub struct ShellArgs {}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Rebuild the remote index and reload it.
    Build,
    /// Show the loaded index size.
    Count,
    /// Show the command list.
    Help,
    /// Leave the shell.
    Quit,
    /// Search for the given text.
    Search(String),
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            return None;
        }

        let command = match trimmed.trim() {
            ":build" | ":b" => Self::Build,
            ":count" | ":c" => Self::Count,
            ":help" | ":h" | ":?" => Self::Help,
            ":quit" | ":q" | ":exit" => Self::Quit,
            _ => Self::Search(trimmed.to_string()),
        };
        Some(command)
    }
}

/// Execute the shell command.
///
/// # Errors
///
/// Returns an error if the registry client cannot be created or the terminal
/// cannot be read or written.
pub async fn execute(_args: ShellArgs, config: &Config) -> Result<()> {
    let session = super::open_session(config)?;
    let mut adapter = TerminalAdapter::stdout(config.format);
    let input = BufReader::new(tokio::io::stdin());
    run_session(&session, input, &mut adapter).await
}

/// Runs the read-search loop until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub async fn run_session<S, R, W>(
    session: &IndexSession<S>,
    input: R,
    adapter: &mut TerminalAdapter<W>,
) -> Result<()>
where
    S: RegistrySource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(e) = session.initial_load(adapter).await {
        tracing::debug!(error = %e, "starting shell with an empty index");
    }

    let interactive = adapter.format() != OutputFormat::Json;
    let mut lines = input.lines();
    loop {
        if interactive {
            adapter.prompt()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ShellCommand::parse(&line) {
            None => {}
            Some(ShellCommand::Quit) => break,
            Some(ShellCommand::Help) => adapter.line(HELP)?,
            Some(ShellCommand::Count) => adapter.show_count(session.current().count),
            Some(ShellCommand::Build) => {
                if let Err(e) = session.on_build_requested(adapter).await {
                    tracing::debug!(error = %e, "keeping previous index");
                }
            }
            Some(ShellCommand::Search(query)) => {
                session.on_search_requested(Some(&query), adapter);
            }
        }
    }

    if interactive {
        adapter.line("")?;
    }
    Ok(())
}
