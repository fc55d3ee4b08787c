//! MCP protocol method handlers
//!
//! Shared by the stdio and SSE transports: both hand raw message text
//! to [`ProtocolHandlers::handle_message`] and deliver whatever comes back.

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::*;
use crate::mcp::tools::ToolRegistry;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const INSTRUCTIONS: &str = "This server provides document search and retrieval. \
    Use the search tool to find relevant documents, then use the fetch tool \
    to retrieve complete document content by id.";

pub struct ProtocolHandlers {
    initialized: AtomicBool,
    tool_registry: ToolRegistry,
}

impl ProtocolHandlers {
    pub fn new(services: Arc<Services>) -> Self {
        let registry = ToolRegistry::for_services(&services);

        info!(
            "Registered MCP tools [{}] ({} backend)",
            registry.names().join(", "),
            services.backend_name()
        );

        Self {
            initialized: AtomicBool::new(false),
            tool_registry: registry,
        }
    }

    /// Whether the client has sent the `initialized` notification
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Process one raw JSON-RPC message
    ///
    /// Returns [`JsonRpcResponse::empty`] for notifications.
    pub async fn handle_message(&self, message: &str) -> JsonRpcResponse {
        debug!("Received: {}", message);

        match parse_request(message) {
            Ok(request) => self.dispatch(request).await,
            Err((id, e)) => {
                warn!("Rejected message: {}", e);
                let (code, message) = e.code_and_message();
                JsonRpcResponse::error(id, code, message)
            }
        }
    }

    /// Route a parsed request to its method handler
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let notification = request.is_notification();

        let outcome = match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "initialized" | "notifications/initialized" => {
                self.handle_initialized(request).await
            }
            "tools/list" => self.handle_tools_list(request).await,
            "tools/call" => self.handle_tools_call(request).await,
            "ping" => self.handle_ping(request).await,
            method if method.starts_with("notifications/") => Ok(JsonRpcResponse::empty()),
            method => Ok(JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {method}"),
            )),
        };

        let response = outcome.unwrap_or_else(|e| {
            error!("Error processing message: {}", e);
            let (code, message) = e.code_and_message();
            JsonRpcResponse::error(id, code, message)
        });

        if notification {
            JsonRpcResponse::empty()
        } else {
            response
        }
    }

    /// Handle initialize request
    pub async fn handle_initialize(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params: InitializeParams = match request.params {
            Some(params) => serde_json::from_value(params)
                .map_err(|e| McpError::InvalidParams(e.to_string()))?,
            None => InitializeParams::default(),
        };

        match &params.client_info {
            Some(client) => info!(
                "Client initialized: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            ),
            None => info!("Client initialized"),
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "quarry".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle initialized notification
    pub async fn handle_initialized(
        &self,
        _request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        self.initialized.store(true, Ordering::SeqCst);
        info!("Server initialized");

        Ok(JsonRpcResponse::empty())
    }

    /// Handle tools/list request
    pub async fn handle_tools_list(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let tools = self.tool_registry.list();
        Ok(JsonRpcResponse::success(request.id, json!({ "tools": tools })))
    }

    /// Handle tools/call request
    ///
    /// A tool that fails while running answers with an `isError` result.
    /// Unknown tools and bad arguments are JSON-RPC errors.
    pub async fn handle_tools_call(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let result = match self.call_tool(request.params).await {
            Ok(result) => result,
            Err(McpError::ToolError(code, message)) => ToolResult::error(code, message),
            Err(e) => {
                let (code, message) = e.code_and_message();
                return Ok(JsonRpcResponse::error(request.id, code, message));
            }
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<ToolResult, McpError> {
        let params: ToolCallParams = match params {
            Some(v) => serde_json::from_value(v)
                .map_err(|e| McpError::InvalidParams(format!("Invalid params: {e}")))?,
            None => return Err(McpError::InvalidParams("Missing params".to_string())),
        };

        let handler = self
            .tool_registry
            .get(&params.name)
            .ok_or_else(|| McpError::InvalidParams(format!("Unknown tool: {}", params.name)))?;

        debug!("Calling tool {}", params.name);
        handler.execute(params.arguments).await.map_err(|e| {
            warn!("Tool {} failed: {}", params.name, e);
            e
        })
    }

    /// Handle ping request
    pub async fn handle_ping(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        Ok(JsonRpcResponse::success(request.id, json!({})))
    }
}

/// Decode one JSON-RPC request, keeping the id for error replies when it is readable
fn parse_request(message: &str) -> Result<JsonRpcRequest, (Option<Value>, McpError)> {
    let value: Value = serde_json::from_str(message)
        .map_err(|e| (None, McpError::ParseError(e.to_string())))?;

    let id = value.get("id").cloned();
    let request: JsonRpcRequest = serde_json::from_value(value)
        .map_err(|e| (id.clone(), McpError::InvalidRequest(e.to_string())))?;

    if request.jsonrpc != "2.0" {
        return Err((
            id,
            McpError::InvalidRequest(format!(
                "Unsupported jsonrpc version: {}",
                request.jsonrpc
            )),
        ));
    }

    Ok(request)
}
