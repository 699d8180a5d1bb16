//! Error types shared by the controllers and the HTTP client.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected before any request is sent. The display text is shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,

    #[error("Please write something in your entry.")]
    EmptyContent,
}

/// Transport-level failures talking to the journal server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("failed to parse config {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("invalid server url {0:?}: expected http:// or https://")]
    ServerUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
