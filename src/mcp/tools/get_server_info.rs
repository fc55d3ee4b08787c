//! Get server info tool handler
//!
//! Reports version, protocol and the active backend of the running server.

use super::handler::{json_content, McpToolHandler};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema, PROTOCOL_VERSION};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Server information payload
#[derive(Debug, Serialize)]
pub struct ServerInfoPayload {
    pub name: &'static str,
    pub version: &'static str,
    pub protocol: &'static str,
    pub backend: &'static str,
    /// Document count, known only for the local backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<usize>,
    pub tools: Vec<&'static str>,
}

pub struct GetServerInfoHandler {
    services: Arc<Services>,
}

impl GetServerInfoHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    pub fn info(&self) -> ServerInfoPayload {
        let backend = self.services.search.backend();
        let mut tools = vec!["search", "fetch", "get_server_info"];
        if backend.supports_hybrid() {
            tools.push("hybrid_search");
        }

        ServerInfoPayload {
            name: "quarry",
            version: env!("CARGO_PKG_VERSION"),
            protocol: PROTOCOL_VERSION,
            backend: backend.name(),
            documents: backend.document_count(),
            tools,
        }
    }
}

#[async_trait]
impl McpToolHandler for GetServerInfoHandler {
    fn name(&self) -> &str {
        "get_server_info"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_server_info".to_string(),
            description: "Get version information about the running quarry server. \
                         Returns server version, protocol version, the active search backend \
                         and the available tools."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
        json_content(&self.info())
    }
}
