//! Error types for the statuscat proxy

use std::fmt;

/// Reasons an upstream fetch can fail
///
/// The HTTP surface collapses all of these into a 404; the distinction
/// exists so logs can tell an absent image from a broken upstream.
#[derive(Debug)]
pub enum FetchError {
    /// The upstream provider has no image for the key
    NotFound,
    /// The upstream provider answered with a non-success status other than 404
    BadStatus(reqwest::StatusCode),
    /// Network or body transfer failure
    Transport(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "upstream has no image for this key"),
            FetchError::BadStatus(status) => write!(f, "upstream returned status {}", status),
            FetchError::Transport(err) => write!(f, "upstream transport error: {}", err),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

/// Startup-level errors surfaced from `main`
#[derive(Debug)]
pub enum ProxyError {
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Io(err) => write!(f, "IO error: {}", err),
            ProxyError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::Io(err) => Some(err.as_ref()),
            ProxyError::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for ProxyError {
    fn from(err: std::io::Error) -> Self {
        ProxyError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ProxyError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ProxyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
