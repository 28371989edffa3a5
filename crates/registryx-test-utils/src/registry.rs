//! In-memory registry with fault injection and call recording.
//!
//! [`FakeRegistry`] behaves like the remote service: `build_index` swaps in
//! the configured rebuilt index, `fetch_index` returns whatever is current.
//! Faults stay active until cleared, and every call is recorded whether it
//! failed or not.
//!
//! # Example
//!
//! ```rust
//! use registryx_core::RegistrySource;
//! use registryx_test_utils::{Fault, FakeRegistry, RegistryCall, collection, record};
//!
//! # tokio_test_block_on(async {
//! let registry = FakeRegistry::new().with_index(collection(vec![record("Alpha", "hello")]));
//! registry.fail_build(Fault::Service(503));
//!
//! assert!(registry.build_index().await.is_err());
//! assert_eq!(registry.fetch_index().await.unwrap().len(), 1);
//! assert_eq!(registry.calls(), vec![RegistryCall::BuildIndex, RegistryCall::FetchIndex]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use registryx_core::{
    Error, IndexCollection, ProjectList, ProjectSummary, ProjectSummaryReport, RegistrySource,
    Result, TeamMember, TeamResponse, WbsGraph,
};

/// A failure the fake registry can be told to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// A non-success HTTP status.
    Service(u16),
    /// A connection-level failure.
    Transport,
}

impl Fault {
    fn to_error(self, operation: &str) -> Error {
        match self {
            Self::Service(status) => Error::Service {
                status,
                message: format!("injected {operation} failure"),
            },
            Self::Transport => Error::transport(format!("injected {operation} failure")),
        }
    }
}

/// One call received by the fake registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    /// `build_index` was called.
    BuildIndex,
    /// `fetch_index` was called.
    FetchIndex,
    /// `list_projects` was called.
    ListProjects,
    /// `fetch_team` was called for the given project.
    FetchTeam(String),
    /// `fetch_summary` was called.
    FetchSummary,
    /// `fetch_wbs` was called for the given project.
    FetchWbs(String),
}

#[derive(Debug, Default)]
struct Faults {
    build: Option<Fault>,
    fetch: Option<Fault>,
    projects: Option<Fault>,
    team: Option<Fault>,
    summary: Option<Fault>,
    wbs: Option<Fault>,
}

#[derive(Debug, Default)]
struct State {
    index: IndexCollection,
    rebuilt: Option<IndexCollection>,
    projects: Vec<ProjectSummary>,
    groups: BTreeMap<String, Vec<ProjectSummary>>,
    teams: HashMap<String, Vec<TeamMember>>,
    summary: ProjectSummaryReport,
    wbs: HashMap<String, WbsGraph>,
    faults: Faults,
    build_delay: Option<Duration>,
    fetch_delay: Option<Duration>,
    calls: Vec<RegistryCall>,
}

/// In-memory stand-in for the remote registry service.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    state: Mutex<State>,
}

impl FakeRegistry {
    /// Creates a registry with an empty index and no projects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index served before any rebuild.
    #[must_use]
    pub fn with_index(self, index: IndexCollection) -> Self {
        self.lock().index = index;
        self
    }

    /// Sets the index that a successful build makes current.
    #[must_use]
    pub fn with_rebuilt_index(self, index: IndexCollection) -> Self {
        self.lock().rebuilt = Some(index);
        self
    }

    /// Sets the project list.
    #[must_use]
    pub fn with_projects(self, projects: Vec<ProjectSummary>) -> Self {
        self.lock().projects = projects;
        self
    }

    /// Files projects under a family in the project listing.
    #[must_use]
    pub fn with_group(self, family: impl Into<String>, projects: Vec<ProjectSummary>) -> Self {
        self.lock().groups.insert(family.into(), projects);
        self
    }

    /// Sets the roster of one project.
    #[must_use]
    pub fn with_team(self, project_id: impl Into<String>, members: Vec<TeamMember>) -> Self {
        self.lock().teams.insert(project_id.into(), members);
        self
    }

    /// Sets the project summary report.
    #[must_use]
    pub fn with_summary(self, summary: ProjectSummaryReport) -> Self {
        self.lock().summary = summary;
        self
    }

    /// Sets the work breakdown of one project. Other projects are not found.
    #[must_use]
    pub fn with_wbs(self, project_id: impl Into<String>, graph: WbsGraph) -> Self {
        self.lock().wbs.insert(project_id.into(), graph);
        self
    }

    /// Makes every build request fail.
    pub fn fail_build(&self, fault: Fault) {
        self.lock().faults.build = Some(fault);
    }

    /// Makes every index fetch fail.
    pub fn fail_fetch(&self, fault: Fault) {
        self.lock().faults.fetch = Some(fault);
    }

    /// Makes every project listing fail.
    pub fn fail_projects(&self, fault: Fault) {
        self.lock().faults.projects = Some(fault);
    }

    /// Makes every team fetch fail.
    pub fn fail_team(&self, fault: Fault) {
        self.lock().faults.team = Some(fault);
    }

    /// Makes every summary fetch fail.
    pub fn fail_summary(&self, fault: Fault) {
        self.lock().faults.summary = Some(fault);
    }

    /// Makes every work breakdown fetch fail.
    pub fn fail_wbs(&self, fault: Fault) {
        self.lock().faults.wbs = Some(fault);
    }

    /// Removes all injected faults.
    pub fn clear_faults(&self) {
        self.lock().faults = Faults::default();
    }

    /// Delays every build request.
    pub fn delay_build(&self, delay: Duration) {
        self.lock().build_delay = Some(delay);
    }

    /// Delays every index fetch.
    pub fn delay_fetch(&self, delay: Duration) {
        self.lock().fetch_delay = Some(delay);
    }

    /// Replaces the index a future build will produce.
    pub fn set_rebuilt_index(&self, index: IndexCollection) {
        self.lock().rebuilt = Some(index);
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: RegistryCall) {
        tracing::trace!(?call, "fake registry call");
        self.lock().calls.push(call);
    }
}

#[async_trait]
impl RegistrySource for FakeRegistry {
    async fn build_index(&self) -> Result<()> {
        self.record(RegistryCall::BuildIndex);
        let delay = self.lock().build_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        if let Some(fault) = state.faults.build {
            return Err(fault.to_error("build"));
        }
        if let Some(rebuilt) = state.rebuilt.clone() {
            state.index = rebuilt;
        }
        Ok(())
    }

    async fn fetch_index(&self) -> Result<IndexCollection> {
        self.record(RegistryCall::FetchIndex);
        let delay = self.lock().fetch_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.lock();
        if let Some(fault) = state.faults.fetch {
            return Err(fault.to_error("fetch"));
        }
        Ok(state.index.clone())
    }

    async fn list_projects(&self) -> Result<ProjectList> {
        self.record(RegistryCall::ListProjects);
        let state = self.lock();
        if let Some(fault) = state.faults.projects {
            return Err(fault.to_error("projects"));
        }
        Ok(ProjectList {
            items: state.projects.clone(),
            count: state.projects.len() as u64,
            groups: state.groups.clone(),
        })
    }

    async fn fetch_team(&self, project_id: &str) -> Result<TeamResponse> {
        self.record(RegistryCall::FetchTeam(project_id.to_string()));
        let state = self.lock();
        if let Some(fault) = state.faults.team {
            return Err(fault.to_error("team"));
        }
        Ok(TeamResponse {
            project_id: Some(project_id.to_string()),
            members: state.teams.get(project_id).cloned().unwrap_or_default(),
        })
    }

    async fn fetch_summary(&self) -> Result<ProjectSummaryReport> {
        self.record(RegistryCall::FetchSummary);
        let state = self.lock();
        if let Some(fault) = state.faults.summary {
            return Err(fault.to_error("summary"));
        }
        Ok(state.summary.clone())
    }

    async fn fetch_wbs(&self, project_id: &str) -> Result<WbsGraph> {
        self.record(RegistryCall::FetchWbs(project_id.to_string()));
        let state = self.lock();
        if let Some(fault) = state.faults.wbs {
            return Err(fault.to_error("wbs"));
        }
        state.wbs.get(project_id).cloned().ok_or_else(|| Error::Service {
            status: 404,
            message: "Project not found".to_string(),
        })
    }
}
