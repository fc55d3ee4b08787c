//! Hybrid (keyword + vector) search tool handler
//!
//! Registered only when the active backend supports it.

use super::handler::{json_content, McpToolHandler};
use super::search::{top_schema, SearchArgs};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct HybridSearchHandler {
    services: Arc<Services>,
}

impl HybridSearchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for HybridSearchHandler {
    fn name(&self) -> &str {
        "hybrid_search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "hybrid_search".to_string(),
            description: "Search documents combining keyword and semantic vector matching. \
                          Useful when exact terms matter as much as meaning. Returns the same \
                          result shape as search."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query string"
                    },
                    "top": top_schema(&self.services)
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args = SearchArgs::parse(args)?;

        let response = self
            .services
            .search
            .hybrid_search(args.into_request())
            .await
            .map_err(McpError::from)?;

        json_content(&response.into_payload())
    }
}
