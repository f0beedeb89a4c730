//! HTTPS static file server used as an integration-test fixture.

pub mod config;
pub mod error;
pub mod http;
pub mod net;
pub mod observability;

pub use config::FixtureConfig;
pub use error::FixtureError;
pub use http::FixtureServer;
