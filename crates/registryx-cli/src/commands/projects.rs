//! Projects command - list registry projects by family.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use registryx_core::RegistrySource;

use crate::Config;
use crate::client::ApiClient;
use crate::render::TerminalAdapter;

/// Arguments for the projects command.
#[derive(Debug, Args)]
pub struct ProjectsArgs {}

/// Execute the projects command.
///
/// # Errors
///
/// Returns an error if the registry cannot be reached or answers with an error.
pub async fn execute(_args: ProjectsArgs, config: &Config) -> Result<()> {
    let client = ApiClient::new(config).context("Failed to create registry client")?;
    run(&client, &mut TerminalAdapter::stdout(config.format)).await
}

/// Lists projects and renders them.
///
/// # Errors
///
/// Returns an error if the listing fails or cannot be written.
pub async fn run<S, W>(source: &S, adapter: &mut TerminalAdapter<W>) -> Result<()>
where
    S: RegistrySource + ?Sized,
    W: Write,
{
    let projects = source
        .list_projects()
        .await
        .context("Failed to list projects")?;
    adapter.write_projects(&projects)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;
    use registryx_test_utils::{Fault, FakeRegistry, project};

    #[tokio::test]
    async fn test_projects_grouped_by_family() {
        let registry = FakeRegistry::new()
            .with_projects(vec![project("P-1", "Propulse Ads"), project("P-2", "Misc Lab")])
            .with_group("Propulse Family", vec![project("P-1", "Propulse Ads")])
            .with_group("Experiments/Misc", vec![project("P-2", "Misc Lab")]);
        let mut adapter = TerminalAdapter::new(OutputFormat::Json, Vec::new());

        run(&registry, &mut adapter).await.expect("projects");

        let out: serde_json::Value =
            serde_json::from_slice(&adapter.into_inner()).expect("json");
        assert_eq!(out["count"], 2);
        assert_eq!(out["groups"]["Propulse Family"][0]["project_id"], "P-1");
        assert_eq!(out["groups"]["Experiments/Misc"][0]["name"], "Misc Lab");
    }

    #[tokio::test]
    async fn test_projects_failure_has_context() {
        let registry = FakeRegistry::new();
        registry.fail_projects(Fault::Service(500));
        let mut adapter = TerminalAdapter::new(OutputFormat::Text, Vec::new());

        let err = run(&registry, &mut adapter).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to list projects");
        assert!(adapter.into_inner().is_empty());
    }
}
