//! MCP-specific error types

use crate::mcp::protocol;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool error (code {0}): {1}")]
    ToolError(i32, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code and message for this error
    pub fn code_and_message(&self) -> (i32, String) {
        match self {
            McpError::ParseError(_) => (protocol::PARSE_ERROR, self.to_string()),
            McpError::InvalidRequest(_) => (protocol::INVALID_REQUEST, self.to_string()),
            McpError::InvalidParams(msg) => (protocol::INVALID_PARAMS, msg.clone()),
            McpError::InternalError(msg) => (protocol::INTERNAL_ERROR, msg.clone()),
            McpError::ToolError(code, msg) => (*code, msg.clone()),
            McpError::Io(e) => (protocol::INTERNAL_ERROR, format!("I/O error: {e}")),
            McpError::Json(e) => (protocol::INTERNAL_ERROR, format!("JSON error: {e}")),
        }
    }
}

impl From<crate::core::error::QuarryError> for McpError {
    fn from(err: crate::core::error::QuarryError) -> Self {
        use crate::core::error::QuarryError;
        match err {
            QuarryError::DocumentNotFound(s) => McpError::ToolError(
                protocol::DOCUMENT_NOT_FOUND,
                format!("Document not found: {s}"),
            ),
            QuarryError::InvalidQuery(s) => McpError::InvalidParams(format!("Invalid query: {s}")),
            QuarryError::InvalidId(s) => McpError::InvalidParams(format!("Invalid id: {s}")),
            QuarryError::UpstreamFailed(s) => McpError::ToolError(
                protocol::UPSTREAM_FAILED,
                format!("Upstream search service failed: {s}"),
            ),
            QuarryError::Unsupported(s) => {
                McpError::ToolError(protocol::UNSUPPORTED, format!("Not supported: {s}"))
            }
            QuarryError::ConfigError(s) => {
                McpError::InvalidParams(format!("Configuration error: {s}"))
            }
            QuarryError::DuplicateDocument(s) => {
                McpError::InternalError(format!("Duplicate document id: {s}"))
            }
            QuarryError::DataSource(s) => McpError::InternalError(format!("Data source error: {s}")),
            QuarryError::IoError(e) => McpError::InternalError(format!("I/O error: {e}")),
            QuarryError::SerdeError(e) => {
                McpError::InternalError(format!("Serialization error: {e}"))
            }
            QuarryError::TomlError(e) => {
                McpError::InternalError(format!("Configuration parse error: {e}"))
            }
        }
    }
}
