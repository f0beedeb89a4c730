//! Configuration loading from the process arguments.

use std::ffi::OsString;
use std::num::ParseIntError;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::schema::FixtureConfig;

/// Number of entries in a well-formed argument vector, program name included.
pub const EXPECTED_ARGS: usize = 5;

/// Used in the usage line when the argument vector has no program name.
const FALLBACK_PROGRAM: &str = env!("CARGO_PKG_NAME");

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Wrong number of arguments. Displays as the usage line.
    #[error("USAGE: {program} <host> <port> <key.pem> <cert.pem>")]
    Usage { program: String },

    /// The port argument is not an integer in `0..=65535`.
    #[error("invalid port {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A host or port argument that is not valid UTF-8.
    #[error("{name} argument {value:?} is not valid UTF-8")]
    NonUnicode { name: &'static str, value: String },
}

/// Raw positional arguments as clap sees them.
#[derive(Debug, Parser)]
#[command(
    name = "https-fixture",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    host: OsString,
    port: OsString,
    key: PathBuf,
    cert: PathBuf,
}

/// Build a [`FixtureConfig`] from a full argument vector (program name first).
///
/// Only the argument count is a usage error. Every argument after the
/// program name is handed to clap behind an end-of-options marker, so values
/// such as `-h` or `--` stay positional. The port is parsed afterwards so
/// that a bad port is reported as such.
pub fn from_args<I, T>(args: I) -> Result<FixtureConfig, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_PROGRAM.to_string());

    if args.len() != EXPECTED_ARGS {
        return Err(ConfigError::Usage { program });
    }

    let positional = std::iter::once(args[0].clone())
        .chain(std::iter::once(OsString::from("--")))
        .chain(args[1..].iter().cloned());
    let parsed = Args::try_parse_from(positional).map_err(|_| ConfigError::Usage {
        program: program.clone(),
    })?;

    let host = into_unicode("host", parsed.host)?;
    let port = parse_port(&into_unicode("port", parsed.port)?)?;

    Ok(FixtureConfig {
        host,
        port,
        key_path: parsed.key,
        cert_path: parsed.cert,
    })
}

fn into_unicode(name: &'static str, value: OsString) -> Result<String, ConfigError> {
    value.into_string().map_err(|value| ConfigError::NonUnicode {
        name,
        value: value.to_string_lossy().into_owned(),
    })
}

/// Parse a port the way a plain integer parser would: surrounding
/// whitespace and a leading `+` are fine, anything else is not.
fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|source| ConfigError::InvalidPort {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_four_positionals() {
        let config = from_args(argv(&["fixture", "127.0.0.1", "8443", "key.pem", "cert.pem"]))
            .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8443);
        assert_eq!(config.key_path, PathBuf::from("key.pem"));
        assert_eq!(config.cert_path, PathBuf::from("cert.pem"));
        assert_eq!(config.bind_target(), ("127.0.0.1", 8443));
    }

    #[test]
    fn wrong_counts_are_usage_errors() {
        let full = ["fixture", "h", "1", "k", "c", "extra", "more"];
        for len in [1, 2, 3, 4, 6, 7] {
            let err = from_args(argv(&full[..len])).unwrap_err();
            assert!(matches!(err, ConfigError::Usage { .. }), "len {len}");
        }
    }

    #[test]
    fn usage_line_names_the_program() {
        let err = from_args(argv(&["./serve"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "USAGE: ./serve <host> <port> <key.pem> <cert.pem>"
        );
    }

    #[test]
    fn empty_argv_falls_back_to_crate_name() {
        let err = from_args(Vec::<String>::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "USAGE: https-fixture <host> <port> <key.pem> <cert.pem>"
        );
    }

    #[test]
    fn non_numeric_port_is_not_a_usage_error() {
        let err = from_args(argv(&["fixture", "localhost", "https", "k", "c"])).unwrap_err();
        match err {
            ConfigError::InvalidPort { value, .. } => assert_eq!(value, "https"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        let err = from_args(argv(&["fixture", "localhost", "65536", "k", "c"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn port_tolerates_whitespace_and_plus() {
        let config = from_args(argv(&["fixture", "localhost", " +8080 ", "k", "c"])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn flag_like_values_are_positional() {
        let config = from_args(argv(&["fixture", "-h", "0", "-k", "--cert"])).unwrap();
        assert_eq!(config.host, "-h");
        assert_eq!(config.key_path, PathBuf::from("-k"));
        assert_eq!(config.cert_path, PathBuf::from("--cert"));
    }

    #[test]
    fn double_dash_is_an_ordinary_value() {
        let config = from_args(argv(&["p", "--", "1", "k", "c"])).unwrap();
        assert_eq!(config.host, "--");
        assert_eq!(config.port, 1);

        let config = from_args(argv(&["p", "h", "1", "k", "--"])).unwrap();
        assert_eq!(config.cert_path, PathBuf::from("--"));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_host_is_not_a_usage_error() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("p"),
            OsString::from_vec(b"ho\xffst".to_vec()),
            OsString::from("1"),
            OsString::from("k"),
            OsString::from("c"),
        ];
        let err = from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::NonUnicode { name: "host", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_paths_are_kept() {
        use std::os::unix::ffi::OsStringExt;

        let key = OsString::from_vec(b"k\xfe.pem".to_vec());
        let args = vec![
            OsString::from("p"),
            OsString::from("h"),
            OsString::from("1"),
            key.clone(),
            OsString::from("c"),
        ];
        let config = from_args(args).unwrap();
        assert_eq!(config.key_path, PathBuf::from(key));
    }
}
