//! Configuration schema definitions.

use std::path::PathBuf;

/// Startup configuration for the fixture server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Host name or address to bind (e.g., "127.0.0.1", "localhost").
    pub host: String,

    /// TCP port to bind. Zero picks an ephemeral port.
    pub port: u16,

    /// PEM-encoded private key.
    pub key_path: PathBuf,

    /// PEM-encoded certificate or certificate chain.
    pub cert_path: PathBuf,
}

impl FixtureConfig {
    /// The `(host, port)` pair handed to the listener.
    pub fn bind_target(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}
