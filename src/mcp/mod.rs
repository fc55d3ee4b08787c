//! MCP (Model Context Protocol) server module
//!
//! This module implements a JSON-RPC 2.0 compliant MCP server that
//! exposes document search and fetch as MCP tools. Two transports
//! share the same handlers: newline-delimited stdio and HTTP with
//! Server-Sent Events.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod sse;
pub mod tools;
pub mod transport;

// Re-export main types
pub use error::McpError;
pub use handlers::ProtocolHandlers;
pub use server::McpServer;
pub use tools::{McpToolHandler, ToolRegistry};
