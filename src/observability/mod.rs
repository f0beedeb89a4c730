//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup events (bind, TLS, serve)  ─┐
//! per-request spans (TraceLayer)     ─┼→ logging.rs (fmt layer) → stderr
//! fatal errors from main             ─┘
//! ```
//!
//! # Design Decisions
//! - stdout is reserved for the usage line; all logs go to stderr
//! - Verbosity is controlled through `RUST_LOG`

pub mod logging;
