//! Top-level error type for the fixture binary.

use thiserror::Error;

use crate::config::ConfigError;
use crate::net::listener::ListenerError;
use crate::net::tls::TlsError;

/// Anything that can stop the fixture server.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Tls(#[from] TlsError),

    /// The document root could not be determined.
    #[error("cannot read working directory: {0}")]
    Cwd(#[source] std::io::Error),

    /// The serve loop itself failed.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl FixtureError {
    /// True for the wrong-argument-count case, which is reported on stdout.
    pub fn is_usage(&self) -> bool {
        matches!(self, FixtureError::Config(ConfigError::Usage { .. }))
    }
}
