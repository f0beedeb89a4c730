//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection (axum-server acceptor)
//!     → server.rs (router, trace + Server header middleware)
//!     → static_files.rs (method check, path translation, file or directory)
//!     → listing.rs (generated index for directories without one)
//!     → response.rs (error pages, redirects, header helpers)
//!     → Send to client
//! ```

pub mod listing;
pub mod path_bytes;
pub mod response;
pub mod server;
pub mod static_files;

pub use server::{FixtureServer, SERVER_NAME};
pub use static_files::StaticFiles;
