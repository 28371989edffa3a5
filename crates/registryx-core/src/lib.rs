//! # registryx-core
//!
//! Client-side index cache and query layer for the registryx API.
//!
//! - **Index Cache**: holds the most recently fetched document collection
//! - **Query Engine**: case-insensitive substring search with a result cap
//! - **Rebuild Coordinator**: build, then fetch, then load, or leave the cache alone
//! - **Index Session**: wires user actions to the above through a presentation adapter
//! - **Team Roster**: project selection and roster lookup
//!
//! The remote service is abstracted as [`RegistrySource`]; this crate
//! contains no HTTP code.
//!
//! ## Example
//!
//! ```rust
//! use registryx_core::prelude::*;
//!
//! let cache = IndexCache::new();
//! cache.load(
//!     vec![
//!         DocumentRecord::new("Alpha", "hello world"),
//!         DocumentRecord::new("Beta", "WORLD of beta"),
//!     ],
//!     2,
//! );
//!
//! let results = QueryEngine::new().search(&cache.current(), Some("world"));
//! assert_eq!(results.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod coordinator;
pub mod document;
pub mod error;
pub mod observability;
pub mod query;
pub mod session;
pub mod source;
pub mod team;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cache::IndexCache;
    pub use crate::coordinator::RebuildCoordinator;
    pub use crate::document::{
        DocumentRecord, IndexCollection, ProjectList, ProjectSummary, ProjectSummaryReport,
        TeamMember, TeamResponse, WbsGraph,
    };
    pub use crate::error::{Error, RebuildStage, Result};
    pub use crate::query::{QueryEngine, SearchHit, SearchResults};
    pub use crate::session::{IndexSession, PresentationAdapter};
    pub use crate::source::RegistrySource;
    pub use crate::team::TeamRoster;
}

pub use cache::IndexCache;
pub use coordinator::{DEFAULT_STEP_TIMEOUT, RebuildCoordinator};
pub use document::{
    DocumentRecord, IndexCollection, ProjectList, ProjectSummary, ProjectSummaryReport,
    TeamMember, TeamResponse, WbsEdge, WbsGraph, WbsNode, WbsProject,
};
pub use error::{Error, RebuildStage, Result};
pub use observability::{LogFormat, init_logging, registry_span};
pub use query::{MAX_RESULTS, PREVIEW_CHARS, QueryEngine, SearchHit, SearchResults};
pub use session::{IndexSession, PresentationAdapter};
pub use source::RegistrySource;
pub use team::TeamRoster;
