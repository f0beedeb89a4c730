//! HTTPS Fixture Server
//!
//! Serves the current working directory over HTTPS until killed.
//!
//! ```text
//! https-fixture <host> <port> <key.pem> <cert.pem>
//! ```
//!
//! # Startup Order
//! 1. Check the argument count (usage on stdout, exit 1)
//! 2. Parse the port (fatal before anything is bound)
//! 3. Bind the TCP listener
//! 4. Load the certificate chain and private key
//! 5. Serve forever

use std::process::ExitCode;

use https_fixture::config;
use https_fixture::http::FixtureServer;
use https_fixture::net::{listener, tls};
use https_fixture::observability::logging;
use https_fixture::FixtureError;

/// Exit status for a wrong argument count.
const USAGE_EXIT: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    // A subscriber can only be missing here if something else installed one.
    let _ = logging::init();

    match run(std::env::args_os()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_usage() => {
            println!("{err}");
            ExitCode::from(USAGE_EXIT)
        }
        Err(err) => {
            tracing::error!(error = %err, "https-fixture failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: std::env::ArgsOs) -> Result<(), FixtureError> {
    let config = config::from_args(args)?;

    let (host, port) = config.bind_target();
    let listener = listener::bind(host, port)?;
    let tls = tls::load_tls_config(&config.cert_path, &config.key_path)?;

    let root = std::env::current_dir().map_err(FixtureError::Cwd)?;
    FixtureServer::new(root).run(listener, tls).await?;
    Ok(())
}
