//! Team roster lookup: pick a project, then fetch its members.

use serde::Serialize;

use crate::document::{ProjectSummary, TeamMember};
use crate::error::Result;
use crate::source::RegistrySource;

/// The roster of one project, together with the project list it was chosen from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamRoster {
    /// Projects offered by the registry.
    pub projects: Vec<ProjectSummary>,
    /// Project whose roster was fetched; `None` when there was nothing to pick.
    pub selected: Option<String>,
    /// Roster rows in registry order.
    pub members: Vec<TeamMember>,
}

impl TeamRoster {
    /// Lists projects and fetches the roster of `project_id`, or of the first
    /// listed project when no id is given.
    ///
    /// With no id and no projects the roster is empty and no team request is
    /// made. A requested id missing from the project list is still fetched.
    ///
    /// # Errors
    ///
    /// Returns the first failing registry call.
    #[tracing::instrument(skip(source))]
    pub async fn load<S>(source: &S, project_id: Option<&str>) -> Result<Self>
    where
        S: RegistrySource + ?Sized,
    {
        let projects = source.list_projects().await?.items;

        let selected = project_id
            .map(str::to_string)
            .or_else(|| projects.first().map(|p| p.project_id.clone()));

        let Some(id) = selected.as_deref() else {
            tracing::debug!("no projects listed; skipping team fetch");
            return Ok(Self {
                projects,
                selected: None,
                members: Vec::new(),
            });
        };

        if !projects.iter().any(|p| p.project_id == id) {
            tracing::debug!(project_id = id, "requested project is not in the project list");
        }

        let members = source.fetch_team(id).await?.members;
        Ok(Self {
            projects,
            selected,
            members,
        })
    }

    /// Display name of the selected project, if it was listed.
    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        let id = self.selected.as_deref()?;
        self.projects
            .iter()
            .find(|p| p.project_id == id)
            .map(|p| p.name.as_str())
    }
}
