//! Error types for talking to the Notion API

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while searching or creating pages
#[derive(Debug, Error)]
pub enum NotionError {
    /// No API token was found in the environment or the env file
    #[error("missing API token: set the {0} environment variable")]
    MissingToken(String),

    /// The token can't be used as an HTTP header value
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for Notion operations
pub type Result<T> = std::result::Result<T, NotionError>;
