//! Structured error types for partyctl-core.
//!
//! The binary (partyctl-cli) wraps these in `anyhow`, but the view and the
//! store seam work with the typed enum so callers can classify failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::member::MemberId;

/// Main error type for partyctl-core operations
#[derive(Error, Debug)]
pub enum PartyError {
    /// Network-level failure (connect, timeout, body read)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Store answered with a non-2xx status
    #[error("{method} {url} returned {status}: {message}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Endpoint is not a usable base URL
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// No member with this id in the local party
    #[error("No party member with id {id}")]
    UnknownMember { id: MemberId },

    /// Commit attempted with nothing selected
    #[error("{message}")]
    EmptySelection { message: &'static str },
}

/// Result type alias for partyctl-core operations
pub type Result<T> = std::result::Result<T, PartyError>;

impl PartyError {
    /// Create a decode error
    pub fn decode(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// True for the single failure class the view cares about: the request
    /// did not complete with a usable 2xx answer.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::Request { .. } | Self::Status { .. } | Self::Decode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PartyError::Status {
            method: "PATCH",
            url: "http://store/party/3".to_string(),
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "PATCH http://store/party/3 returned 404: not found"
        );

        let err = PartyError::config("/tmp/config.toml", "expected a table");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("/tmp/config.toml"));
    }

    #[test]
    fn test_request_failure_classification() {
        assert!(PartyError::decode("http://store/party", "expected array").is_request_failure());
        assert!(!PartyError::UnknownMember { id: MemberId::from(7) }.is_request_failure());
        assert!(!PartyError::config("x", "y").is_request_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PartyError = io_err.into();

        assert!(matches!(err, PartyError::Io { .. }));
    }
}
