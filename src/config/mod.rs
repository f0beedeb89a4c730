//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! argv (program, host, port, key.pem, cert.pem)
//!     → loader.rs (arity check, clap parse, port parse)
//!     → FixtureConfig (validated, immutable)
//!     → handed to main for bind + TLS setup
//! ```
//!
//! # Design Decisions
//! - Positional arguments only: no flags, files, or environment
//! - Only the argument count is validated up front; everything else fails
//!   where it is used

pub mod loader;
pub mod schema;

pub use loader::{from_args, ConfigError};
pub use schema::FixtureConfig;
