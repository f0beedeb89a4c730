//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! (host, port)
//!     → listener.rs (bind, non-blocking std socket)
//! (cert.pem, key.pem)
//!     → tls.rs (rustls ServerConfig, HTTP/1.1 ALPN)
//!     → both handed to http::server for the accept loop
//! ```
//!
//! # Design Decisions
//! - The socket is bound before TLS material is read
//! - Every accepted connection is TLS; there is no plaintext fallback

pub mod listener;
pub mod tls;
