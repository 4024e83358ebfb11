//! Source error types
//!
//! Errors that can occur while fetching dashboard payloads.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when fetching payloads
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading a payload file failed
    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: std::io::Error },

    /// Payload was not valid JSON for its document type
    #[error("Failed to parse {document}: {error}")]
    Parse {
        document: &'static str,
        error: serde_json::Error,
    },

    /// Upstream request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Source configuration is incomplete
    #[error("Source configuration error: {0}")]
    Config(String),
}

/// Result type alias for source operations
pub type SourceResult<T> = Result<T, SourceError>;
