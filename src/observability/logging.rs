//! Logging initialization.
//!
//! # Responsibilities
//! - Install the global tracing subscriber
//! - Pick up `RUST_LOG`, falling back to [`DEFAULT_FILTER`]

use std::io::IsTerminal;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "https_fixture=info,tower_http=info";

/// Install the global subscriber writing human-readable lines to stderr.
///
/// Fails only if a subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .try_init()
}
