//! Shared test utilities for registryx.
//!
//! This crate provides:
//! - [`FakeRegistry`]: an in-memory registry with fault injection and call recording
//! - Factory functions for documents, collections, projects, rosters, and work breakdowns

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]

pub mod fixtures;
pub mod registry;

pub use fixtures::*;
pub use registry::*;

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("registryx=debug")),
        )
        .with_test_writer()
        .try_init();
}
