//! TCP listener setup.
//!
//! # Responsibilities
//! - Resolve and bind the configured `(host, port)`
//! - Hand back a std socket ready to be adopted by the async runtime

use std::net::TcpListener;

use thiserror::Error;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address (port in use, unknown host, ...).
    #[error("failed to bind {host}:{port}: {source}")]
    Bind {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// Bind a TCP listener on `(host, port)`.
///
/// `host` may be a name; it is resolved and the first address that binds
/// wins. The socket is switched to non-blocking mode because the serve loop
/// adopts it into tokio.
pub fn bind(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let map_err = |source| ListenerError::Bind {
        host: host.to_string(),
        port,
        source,
    };

    let listener = TcpListener::bind((host, port)).map_err(map_err)?;
    listener.set_nonblocking(true).map_err(map_err)?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Listener bound");
    }

    Ok(listener)
}
