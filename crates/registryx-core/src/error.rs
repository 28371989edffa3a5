//! Error types and result aliases for registryx.
//!
//! Every failure the core can surface to a caller is one of these variants.
//! A missing optional field in a registry response is never an error; see
//! [`crate::document`] for the decoding rules.

use std::fmt;
use std::time::Duration;

/// The result type used throughout registryx.
pub type Result<T> = std::result::Result<T, Error>;

/// Step of a rebuild-and-refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildStage {
    /// The index build request.
    Build,
    /// The follow-up index fetch.
    Fetch,
}

impl fmt::Display for RebuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Build => "build",
            Self::Fetch => "fetch",
        };
        write!(f, "{s}")
    }
}

/// Errors that can occur in registryx operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent, or the response body could not be read.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The registry answered with a non-success status.
    #[error("registry error ({status}): {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response body was not decodable.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the decoding failure.
        message: String,
    },

    /// A remote call did not complete within its bound.
    #[error("{operation} timed out after {}s", timeout.as_secs_f64())]
    Timeout {
        /// The operation that timed out.
        operation: &'static str,
        /// The bound that was exceeded.
        timeout: Duration,
    },

    /// A rebuild-and-refresh cycle failed; the cache was left untouched.
    #[error("index rebuild failed at {stage} step")]
    Rebuild {
        /// The step that failed.
        stage: RebuildStage,
        /// The failure of that step.
        #[source]
        source: Box<Error>,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates a new transport error with the given message.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a source cause.
    #[must_use]
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Wraps a step failure as a rebuild error.
    #[must_use]
    pub fn rebuild(stage: RebuildStage, source: Self) -> Self {
        Self::Rebuild {
            stage,
            source: Box::new(source),
        }
    }

    /// Returns the failed rebuild step, if this is a rebuild error.
    #[must_use]
    pub fn rebuild_stage(&self) -> Option<RebuildStage> {
        match self {
            Self::Rebuild { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns true when the failure is a timeout, directly or inside a rebuild.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Rebuild { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}
