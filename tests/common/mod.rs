//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use https_fixture::http::FixtureServer;
use https_fixture::net::{listener, tls};

pub const CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cert.pem");
pub const KEY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/key.pem");

/// Start an in-process fixture serving `root` on an ephemeral loopback port.
///
/// The socket is bound before this returns, so requests can be sent
/// immediately.
#[allow(dead_code)]
pub fn start_fixture(root: &Path) -> SocketAddr {
    let listener = listener::bind("127.0.0.1", 0).unwrap();
    let addr = listener.local_addr().unwrap();
    let tls = tls::load_tls_config(Path::new(CERT), Path::new(KEY)).unwrap();
    let server = FixtureServer::new(root);

    tokio::spawn(async move {
        let _ = server.run(listener, tls).await;
    });

    addr
}

/// HTTPS client trusting the self-signed fixture certificate, with no
/// connection reuse so every request opens a fresh TLS session.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
