//! registryx CLI - search index and team roster client.
//!
//! The main entry point for the `registryx` CLI binary.

use anyhow::Result;
use clap::Parser;

use registryx_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    registryx_core::init_logging(cli.log_format.into(), "warn");
    let config = cli.config();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Index(args) => registryx_cli::commands::index::execute(args, &config).await,
            Commands::Rebuild(args) => {
                registryx_cli::commands::rebuild::execute(args, &config).await
            }
            Commands::Search(args) => registryx_cli::commands::search::execute(args, &config).await,
            Commands::Projects(args) => {
                registryx_cli::commands::projects::execute(args, &config).await
            }
            Commands::Summary(args) => {
                registryx_cli::commands::summary::execute(args, &config).await
            }
            Commands::Team(args) => registryx_cli::commands::team::execute(args, &config).await,
            Commands::Wbs(args) => registryx_cli::commands::wbs::execute(args, &config).await,
            Commands::Shell(args) => registryx_cli::commands::shell::execute(args, &config).await,
        }
    })
}
