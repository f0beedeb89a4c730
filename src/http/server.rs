//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the static-file handler as fallback
//! - Wire up middleware (request tracing, `Server` header)
//! - Serve HTTPS on an already-bound listener until the process dies

use std::path::PathBuf;

use axum::http::{header, HeaderValue};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::http::static_files::{self, StaticFiles};

/// Value of the `Server` response header.
pub const SERVER_NAME: &str = concat!("https-fixture/", env!("CARGO_PKG_VERSION"));

/// HTTPS static file server.
pub struct FixtureServer {
    router: Router,
    files: StaticFiles,
}

impl FixtureServer {
    /// Create a server that resolves request paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let files = StaticFiles::new(root);
        let router = Self::build_router(files.clone());
        Self { router, files }
    }

    fn build_router(files: StaticFiles) -> Router {
        Router::new()
            .fallback(static_files::handle)
            .with_state(files)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::SERVER,
                HeaderValue::from_static(SERVER_NAME),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve HTTPS on `listener` forever.
    ///
    /// Each accepted connection completes a TLS handshake before any HTTP is
    /// read. Handshake failures only drop that connection. Returns only if
    /// the accept loop itself fails.
    pub async fn run(
        self,
        listener: std::net::TcpListener,
        tls: RustlsConfig,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root = %self.files.root().display(),
            "Serving HTTPS"
        );

        axum_server::from_tcp_rustls(listener, tls)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The document root.
    pub fn root(&self) -> &std::path::Path {
        self.files.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn router_serves_files_with_server_header() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<h1>ok</h1>").unwrap();
        let server = FixtureServer::new(dir.path());
        assert_eq!(server.root(), dir.path());

        let response = server
            .router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::SERVER], SERVER_NAME);
    }

    #[tokio::test]
    async fn router_falls_back_for_every_method() {
        let dir = tempfile::tempdir().unwrap();
        let server = FixtureServer::new(dir.path());

        let response = server
            .router()
            .oneshot(Request::delete("/anything").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
