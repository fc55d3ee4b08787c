//! Search tool handler

use super::handler::{json_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::SearchRequest;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Arguments shared by `search` and `hybrid_search`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchArgs {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub top: Option<i64>,
}

impl SearchArgs {
    pub(crate) fn parse(args: Value) -> Result<Self, McpError> {
        // Clients may omit arguments entirely
        let args = if args.is_null() { json!({}) } else { args };
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))
    }

    /// Build the core request; `top` below 1 counts as 1
    pub(crate) fn into_request(self) -> SearchRequest {
        SearchRequest {
            query: self.query,
            top: self
                .top
                .map(|top| usize::try_from(top.max(1)).unwrap_or(usize::MAX)),
        }
    }
}

/// JSON schema of the `top` argument for the active backend
pub(crate) fn top_schema(services: &Services) -> Value {
    if services.search.backend().supports_hybrid() {
        let remote = &services.config.remote;
        json!({
            "type": "integer",
            "description": format!(
                "Maximum number of results to return (1-{}, default {})",
                remote.max_top, remote.default_top
            ),
            "minimum": 1,
            "maximum": remote.max_top
        })
    } else {
        json!({
            "type": "integer",
            "description": "Maximum number of results to return",
            "minimum": 1
        })
    }
}

pub struct SearchHandler {
    services: Arc<Services>,
}

impl SearchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn description(&self) -> String {
        match self.services.backend_name() {
            "remote" => "Search for documents using semantic vector search. Natural language \
                         queries work best. Returns a list of results with id, title, text \
                         snippet, score and optional URL. Use the fetch tool to get complete \
                         document content."
                .to_string(),
            _ => "Search for documents using keyword matching across titles, content and \
                  metadata. Multiple keywords separated by spaces match documents containing \
                  any of them. Returns a list of results with id, title, text snippet and \
                  optional URL. Use the fetch tool to get complete document content."
                .to_string(),
        }
    }
}

#[async_trait]
impl McpToolHandler for SearchHandler {
    fn name(&self) -> &str {
        "search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search".to_string(),
            description: self.description(),
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
            .search(args.into_request())
            .await
            .map_err(McpError::from)?;

        json_content(&response.into_payload())
    }
}
