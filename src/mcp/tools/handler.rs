//! Tool handler trait and common types

use crate::mcp::error::McpError;
use crate::mcp::protocol::{ContentBlock, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Trait for MCP tool implementations
///
/// Each tool (search, fetch, etc.) implements this trait
/// to provide schema and execution logic.
#[async_trait]
pub trait McpToolHandler: Send + Sync {
    /// Tool name (e.g., "search")
    fn name(&self) -> &str;

    /// Tool schema for tools/list
    fn schema(&self) -> ToolSchema;

    /// Execute tool with arguments
    async fn execute(&self, args: Value) -> Result<ToolResult, McpError>;
}

/// Serialize a payload as JSON text plus structured content
pub fn json_content<T: Serialize>(payload: &T) -> Result<ToolResult, McpError> {
    let value = serde_json::to_value(payload)?;
    let text = serde_json::to_string(&value)?;

    Ok(ToolResult {
        content: vec![ContentBlock::Text { text }],
        structured_content: Some(value),
        is_error: false,
    })
}
