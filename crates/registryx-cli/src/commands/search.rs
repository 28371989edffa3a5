//! Search command - load the index and run one query against it.

use anyhow::{Context, Result};
use clap::Args;

use registryx_core::{IndexSession, RegistrySource};

use crate::Config;
use crate::render::TerminalAdapter;

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in document names and bodies (case-insensitive).
    #[arg()]
    pub query: String,

    /// Rebuild the remote index before searching.
    #[arg(long, short = 'r')]
    pub rebuild: bool,
}

/// Execute the search command.
///
/// # Errors
///
/// Returns an error if the index cannot be loaded.
pub async fn execute(args: SearchArgs, config: &Config) -> Result<()> {
    let session = super::open_session(config)?;
    let mut adapter = TerminalAdapter::stdout(config.format);
    run(&session, &args, &mut adapter).await
}

/// Loads the index (rebuilding first if asked) and renders one search.
///
/// # Errors
///
/// Returns an error if the index cannot be loaded.
pub async fn run<S, W>(
    session: &IndexSession<S>,
    args: &SearchArgs,
    adapter: &mut TerminalAdapter<W>,
) -> Result<()>
where
    S: RegistrySource,
    W: std::io::Write,
{
    if args.rebuild {
        session
            .rebuild_and_refresh()
            .await
            .context("Index rebuild failed")?;
    } else {
        session.refresh().await.context("Failed to fetch index")?;
    }

    session.on_search_requested(Some(&args.query), adapter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SearchArgs,
    }

    #[test]
    fn test_search_args_parsing() {
        let cli = TestCli::parse_from(["test", "launch plan"]);
        assert_eq!(cli.args.query, "launch plan");
        assert!(!cli.args.rebuild);
    }

    #[tokio::test]
    async fn test_run_rebuilds_before_searching() {
        use registryx_test_utils::{FakeRegistry, RegistryCall, collection, record};

        use crate::OutputFormat;

        let registry = FakeRegistry::new()
            .with_index(collection(vec![record("Stale", "youtube")]))
            .with_rebuilt_index(collection(vec![record("Fresh", "YouTube launch")]));
        let session = IndexSession::new(registry);
        let mut adapter = TerminalAdapter::new(OutputFormat::Json, Vec::new());
        let args = SearchArgs {
            query: "youtube".to_string(),
            rebuild: true,
        };

        run(&session, &args, &mut adapter).await.expect("search");

        let out: serde_json::Value =
            serde_json::from_slice(&adapter.into_inner()).expect("json");
        assert_eq!(out["hits"][0]["record"]["name"], "Fresh");
        assert_eq!(
            session.source().calls(),
            vec![RegistryCall::BuildIndex, RegistryCall::FetchIndex]
        );
    }

    #[tokio::test]
    async fn test_run_fails_without_index() {
        use registryx_test_utils::{Fault, FakeRegistry};

        use crate::OutputFormat;

        let registry = FakeRegistry::new();
        registry.fail_fetch(Fault::Service(500));
        let session = IndexSession::new(registry);
        let mut adapter = TerminalAdapter::new(OutputFormat::Text, Vec::new());
        let args = SearchArgs {
            query: "anything".to_string(),
            rebuild: false,
        };

        let err = run(&session, &args, &mut adapter).await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch index"));
        assert!(adapter.into_inner().is_empty());
    }

    #[test]
    fn test_search_args_with_rebuild() {
        let cli = TestCli::parse_from(["test", "--rebuild", "youtube"]);
        assert_eq!(cli.args.query, "youtube");
        assert!(cli.args.rebuild);
    }
}
