use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a [`TransportClient`](crate::TransportClient).
///
/// The workflow treats every variant the same way; the distinction exists
/// for logging.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
#[error("Failed to read {path}: {source}")]
pub struct FileReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// The two failure kinds a submission can end in.
///
/// `Display` yields the fixed text shown to the user; the underlying cause
/// is logged and dropped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowFailure {
    #[error("Error sending message")]
    TextSend,

    #[error("Error uploading file(s)")]
    Upload,
}
