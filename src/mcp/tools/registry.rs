//! Tool registry for the MCP server
//!
//! Holds the tool set for one backend, keyed and listed by tool name.

use super::handler::McpToolHandler;
use super::{FetchHandler, GetServerInfoHandler, HybridSearchHandler, SearchHandler};
use crate::core::services::Services;
use crate::mcp::protocol::ToolSchema;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct ToolRegistry {
    handlers: BTreeMap<String, Arc<dyn McpToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register the tools offered by the active backend
    ///
    /// `hybrid_search` is only added when the backend supports it.
    pub fn for_services(services: &Arc<Services>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SearchHandler::new(Arc::clone(services))));
        registry.register(Arc::new(FetchHandler::new(Arc::clone(services))));
        registry.register(Arc::new(GetServerInfoHandler::new(Arc::clone(services))));
        if services.search.backend().supports_hybrid() {
            registry.register(Arc::new(HybridSearchHandler::new(Arc::clone(services))));
        }
        registry
    }

    /// Add a handler, replacing any tool with the same name
    pub fn register(&mut self, handler: Arc<dyn McpToolHandler>) {
        self.handlers.insert(handler.name().to_string(), handler);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpToolHandler>> {
        self.handlers.get(name)
    }

    /// Schemas for tools/list, ordered by name
    pub fn list(&self) -> Vec<ToolSchema> {
        self.handlers.values().map(|h| h.schema()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered tool names, ordered
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
