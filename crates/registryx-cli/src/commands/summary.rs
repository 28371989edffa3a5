//! Summary command - project counts by family, channel, category, status
//! and completion.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use registryx_core::RegistrySource;

use crate::Config;
use crate::client::ApiClient;
use crate::render::TerminalAdapter;

/// Arguments for the summary command.
#[derive(Debug, Args)]
pub struct SummaryArgs {}

/// Execute the summary command.
///
/// # Errors
///
/// Returns an error if the registry cannot be reached or answers with an error.
pub async fn execute(_args: SummaryArgs, config: &Config) -> Result<()> {
    let client = ApiClient::new(config).context("Failed to create registry client")?;
    run(&client, &mut TerminalAdapter::stdout(config.format)).await
}

/// Fetches the project summary and renders it.
///
/// # Errors
///
/// Returns an error if the fetch fails or the output cannot be written.
pub async fn run<S, W>(source: &S, adapter: &mut TerminalAdapter<W>) -> Result<()>
where
    S: RegistrySource + ?Sized,
    W: Write,
{
    let summary = source
        .fetch_summary()
        .await
        .context("Failed to fetch project summary")?;
    adapter.write_summary(&summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;
    use registryx_core::ProjectSummaryReport;
    use registryx_test_utils::{Fault, FakeRegistry, RegistryCall};

    #[tokio::test]
    async fn test_summary_renders_breakdowns() {
        let mut report = ProjectSummaryReport {
            total: 4,
            ..ProjectSummaryReport::default()
        };
        report.families.insert("YouTube Automations".to_string(), 3);
        report.families.insert("Core Platforms".to_string(), 1);
        report.status.insert("unspecified".to_string(), 4);
        let registry = FakeRegistry::new().with_summary(report);
        let mut adapter = TerminalAdapter::new(OutputFormat::Text, Vec::new());

        run(&registry, &mut adapter).await.expect("summary");

        let out = String::from_utf8(adapter.into_inner()).expect("utf8");
        assert!(out.contains("YouTube Automations"));
        assert!(out.contains("unspecified"));
        assert!(out.ends_with("Total projects: 4\n"));
        assert_eq!(registry.calls(), vec![RegistryCall::FetchSummary]);
    }

    #[tokio::test]
    async fn test_summary_failure_has_context() {
        let registry = FakeRegistry::new();
        registry.fail_summary(Fault::Transport);
        let mut adapter = TerminalAdapter::new(OutputFormat::Json, Vec::new());

        let err = run(&registry, &mut adapter).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch project summary");
        assert!(err.chain().any(|cause| cause.to_string().contains("transport error")));
    }
}
