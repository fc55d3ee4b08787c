//! MCP tool implementations
//!
//! This module contains the MCP tool handlers that expose document
//! search and retrieval to AI clients.

pub mod fetch;
pub mod get_server_info;
pub mod handler;
pub mod hybrid_search;
pub mod registry;
pub mod search;

pub use fetch::FetchHandler;
pub use get_server_info::GetServerInfoHandler;
pub use handler::{json_content, McpToolHandler};
pub use hybrid_search::HybridSearchHandler;
pub use registry::ToolRegistry;
pub use search::SearchHandler;
