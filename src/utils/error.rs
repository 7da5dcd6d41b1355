//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the tracing backend
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Backend returned HTTP {status} for trace {trace_id}")]
    UnexpectedStatus { trace_id: String, status: u16 },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl RpcError {
    /// HTTP status code, when the failure came from a non-200 response
    pub fn status(&self) -> Option<u16> {
        match self {
            RpcError::UnexpectedStatus { status, .. } => Some(*status),
            RpcError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            RpcError::InvalidResponse(_) => None,
        }
    }
}

/// Errors that can occur while reading a backend trace body
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Expected a JSON array of spans, got {0}")]
    NotAnArray(&'static str),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while resolving settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] ini::ParseError),

    #[error("Missing required setting: {0}")]
    MissingKey(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
