//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use thiserror::Error;

/// The only application protocol offered during the handshake.
pub const ALPN_HTTP_1_1: &[u8] = b"http/1.1";

/// Error type for TLS setup.
#[derive(Debug, Error)]
pub enum TlsError {
    /// The file could not be opened or is not valid PEM.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The certificate file parsed but held no certificates.
    #[error("no certificates found in {}", .0.display())]
    NoCertificates(PathBuf),

    /// The key file parsed but held no private key.
    #[error("no private key found in {}", .0.display())]
    NoPrivateKey(PathBuf),

    /// rustls refused the certificate/key pair.
    #[error("invalid TLS configuration: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Load TLS configuration from certificate and key files.
pub fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, TlsError> {
    let config = build_server_config(cert_path, key_path)?;
    Ok(RustlsConfig::from_config(Arc::new(config)))
}

/// Build the server-side rustls configuration.
///
/// TLS 1.2 and 1.3 with the ring provider's default suites, no client
/// authentication, and `http/1.1` as the only ALPN protocol.
pub fn build_server_config(cert_path: &Path, key_path: &Path) -> Result<ServerConfig, TlsError> {
    let certs = read_certificates(cert_path)?;
    let key = read_private_key(key_path)?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![ALPN_HTTP_1_1.to_vec()];

    tracing::debug!(
        cert = %cert_path.display(),
        key = %key_path.display(),
        "TLS context ready"
    );

    Ok(config)
}

fn open(path: &Path) -> Result<BufReader<File>, TlsError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn read_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let certs = rustls_pemfile::certs(&mut open(path)?)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    if certs.is_empty() {
        return Err(TlsError::NoCertificates(path.to_path_buf()));
    }
    Ok(certs)
}

fn read_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    rustls_pemfile::private_key(&mut open(path)?)
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey(path.to_path_buf()))
}
