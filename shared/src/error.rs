//! Error types for the calendar proxy.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a calendar request.
#[derive(Error, Debug)]
pub enum Error {
    /// No `url` query parameter was supplied
    #[error("Missing url")]
    MissingUrl,

    /// The `url` parameter is not an absolute URL
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The hostname is not on the allow-list
    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),

    /// Upstream answered with a non-success status
    #[error("Upstream responded with status {0}")]
    Upstream(StatusCode),

    /// Upstream could not be reached or its body could not be read
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MissingUrl | Error::InvalidUrl(_) | Error::HostNotAllowed(_) => 400,
            Error::Upstream(_) => 502,
            _ => 500,
        }
    }

    /// Message returned to the caller. Never carries upstream details.
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::MissingUrl => "Missing url",
            Error::InvalidUrl(_) => "Invalid url",
            Error::HostNotAllowed(_) => "Host not allowed",
            Error::Upstream(_) => "Upstream error",
            Error::Fetch(_) => "Fetch failed",
            Error::Config(_) => "Internal error",
        }
    }
}
