//! Fetch tool handler

use super::handler::{json_content, McpToolHandler};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct FetchHandler {
    services: Arc<Services>,
}

impl FetchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for FetchHandler {
    fn name(&self) -> &str {
        "fetch"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "fetch".to_string(),
            description: "Retrieve complete document content by ID for detailed analysis and \
                          citation. Use this after finding relevant documents with the search \
                          tool. Returns id, title, text, full content, optional URL and metadata."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Unique identifier of the document, as returned by search",
                        "minLength": 1
                    }
                },
                "required": ["id"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct FetchArgs {
            id: String,
        }

        let args: FetchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let document = self
            .services
            .search
            .fetch(&args.id)
            .await
            .map_err(McpError::from)?;

        json_content(&document)
    }
}
