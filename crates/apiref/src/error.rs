//! Error types for apiref

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or extracting API references
#[derive(Debug, Error)]
pub enum ApirefError {
    /// Location is missing
    #[error("Missing required parameter: location")]
    MissingLocation,

    /// Reading a local file failed
    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// The documentation container was not found in the page
    #[error("Content container not found: {0}")]
    MissingContainer(String),

    /// A configured CSS selector does not parse
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Registry file is not valid
    #[error("Invalid registry: {0}")]
    InvalidRegistry(#[source] serde_json::Error),

    /// Loader-specific error
    #[error("Loader error: {0}")]
    LoaderError(String),
}

impl ApirefError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApirefError::Timeout
        } else if err.is_connect() {
            ApirefError::ConnectError(err)
        } else {
            ApirefError::RequestError(err.to_string())
        }
    }

    /// Create an I/O error bound to the path that failed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApirefError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ApirefError>;
