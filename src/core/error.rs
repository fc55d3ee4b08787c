//! Error types and error handling for the Quarry document server.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (MCP error codes,
//! HTTP status codes) is handled in the respective adapter modules.

use thiserror::Error;

/// Result type alias for Quarry operations
pub type Result<T> = std::result::Result<T, QuarryError>;

/// Main error type for the Quarry service
#[derive(Error, Debug)]
pub enum QuarryError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Upstream search service failed: {0}")]
    UpstreamFailed(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Duplicate document id: {0}")]
    DuplicateDocument(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl QuarryError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuarryError::DocumentNotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            QuarryError::InvalidQuery(_) | QuarryError::InvalidId(_) | QuarryError::ConfigError(_)
        )
    }

    /// Check if the remote search service caused this error
    pub fn is_upstream(&self) -> bool {
        matches!(self, QuarryError::UpstreamFailed(_))
    }
}

impl From<reqwest::Error> for QuarryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QuarryError::UpstreamFailed(format!("request timed out: {err}"))
        } else {
            QuarryError::UpstreamFailed(err.to_string())
        }
    }
}
