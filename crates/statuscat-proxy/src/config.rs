//! Startup configuration
//!
//! All three options are required; clap exits with a usage error when any
//! is missing. The parsed struct is built once in `main` and handed to the
//! server by ownership, never mutated afterwards.

use std::path::PathBuf;

use clap::Parser;

/// Caching proxy for HTTP status code images
#[derive(Parser, Debug, Clone)]
#[command(name = "statuscat-proxy", version)]
#[command(about = "Serves status code images from a disk cache, fetching misses upstream")]
pub struct ProxyConfig {
    /// Address to bind the server on
    #[arg(short = 'H', long)]
    pub host: String,

    /// Port to bind the server on
    #[arg(short, long)]
    pub port: u16,

    /// Cache directory, created at startup if absent
    #[arg(short, long)]
    pub cache: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        ProxyConfig::command().debug_assert();
    }

    #[test]
    fn test_parses_long_options() {
        let config = ProxyConfig::try_parse_from([
            "statuscat-proxy",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--cache",
            "/tmp/images",
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache, PathBuf::from("/tmp/images"));
    }

    #[test]
    fn test_parses_short_options() {
        let config = ProxyConfig::try_parse_from([
            "statuscat-proxy",
            "-H",
            "0.0.0.0",
            "-p",
            "3000",
            "-c",
            "cache",
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache, PathBuf::from("cache"));
    }

    #[test]
    fn test_missing_option_is_a_usage_error() {
        let result =
            ProxyConfig::try_parse_from(["statuscat-proxy", "--host", "127.0.0.1", "--port", "80"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        let result = ProxyConfig::try_parse_from([
            "statuscat-proxy",
            "--host",
            "127.0.0.1",
            "--port",
            "eighty",
            "--cache",
            "/tmp/images",
        ]);
        assert!(result.is_err());
    }
}
