//! Logging setup and span helpers.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs.
    Json,
    /// Human-readable logs.
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// `RUST_LOG` takes precedence; `default_directive` applies when it is unset
/// or invalid. Safe to call more than once; later calls are no-ops.
///
/// # Example
///
/// ```rust
/// use registryx_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty, "warn");
/// ```
pub fn init_logging(format: LogFormat, default_directive: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        fmt::layer()
                            .with_target(false)
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
        }
    });
}

/// Creates a span for one call against the registry service.
///
/// # Example
///
/// ```rust
/// use registryx_core::observability::registry_span;
///
/// let span = registry_span("fetch_index", "http://localhost:8000");
/// let _guard = span.enter();
/// ```
#[must_use]
pub fn registry_span(operation: &str, base_url: &str) -> Span {
    tracing::info_span!("registry", op = operation, base_url = base_url)
}
