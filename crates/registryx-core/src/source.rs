//! The remote registry as seen by the core.
//!
//! The core never talks HTTP itself. Anything that can build and serve the
//! registry index implements [`RegistrySource`]; the CLI provides a reqwest
//! implementation and the test utilities provide an in-memory one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{IndexCollection, ProjectList, ProjectSummaryReport, TeamResponse, WbsGraph};
use crate::error::Result;

/// Registry endpoint paths, relative to the service base URL.
pub mod paths {
    /// Triggers a server-side index rebuild.
    pub const BUILD_INDEX: &str = "/registryx/index/build";
    /// Returns the current index collection.
    pub const INDEX: &str = "/registryx/index";
    /// Lists registry projects, grouped by family.
    pub const PROJECTS: &str = "/registryx/projects";
    /// Project counts by family, channel, category, status and completion.
    pub const SUMMARY: &str = "/registryx/projects/summary";
    /// Returns the team roster for a `project_id` query parameter.
    pub const TEAM: &str = "/registryx/team";
    /// Returns the work breakdown for a `project_id` query parameter.
    pub const WBS: &str = "/registryx/wbs";
}

/// Operations the remote registry service exposes to the client.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Asks the registry to regenerate its index. The response body is opaque.
    async fn build_index(&self) -> Result<()>;

    /// Fetches the current index collection.
    async fn fetch_index(&self) -> Result<IndexCollection>;

    /// Lists registry projects.
    async fn list_projects(&self) -> Result<ProjectList>;

    /// Fetches the team roster of one project.
    async fn fetch_team(&self, project_id: &str) -> Result<TeamResponse>;

    /// Fetches project counts per family, channel, category, status and
    /// completion bucket.
    async fn fetch_summary(&self) -> Result<ProjectSummaryReport>;

    /// Fetches the work breakdown of one project. Unknown projects are a
    /// service error.
    async fn fetch_wbs(&self, project_id: &str) -> Result<WbsGraph>;
}

#[async_trait]
impl<T: RegistrySource + ?Sized> RegistrySource for Arc<T> {
    async fn build_index(&self) -> Result<()> {
        (**self).build_index().await
    }

    async fn fetch_index(&self) -> Result<IndexCollection> {
        (**self).fetch_index().await
    }

    async fn list_projects(&self) -> Result<ProjectList> {
        (**self).list_projects().await
    }

    async fn fetch_team(&self, project_id: &str) -> Result<TeamResponse> {
        (**self).fetch_team(project_id).await
    }

    async fn fetch_summary(&self) -> Result<ProjectSummaryReport> {
        (**self).fetch_summary().await
    }

    async fn fetch_wbs(&self, project_id: &str) -> Result<WbsGraph> {
        (**self).fetch_wbs(project_id).await
    }
}
