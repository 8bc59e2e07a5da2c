//! Centralized error types and handling

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("OpenStack query error: {0}")]
    Ostack(#[from] OstackError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while talking to the networking control plane
#[derive(Debug, Error)]
pub enum OstackError {
    #[error("no {endpoint} url to query")]
    MissingEndpoint { endpoint: &'static str },

    #[error("project scoped request needs a project id")]
    MissingProjectId,

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error talking to {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} at {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("{context}: unable to unpack json: {source}")]
    Decode {
        context: &'static str,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OstackError {
    /// True when the request went out and failed, as opposed to failing
    /// before it was sent or after a body came back
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("Missing required configuration: {field}")]
    MissingRequired { field: String },

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
