//! Quarry - document search and retrieval for AI assistants
//!
//! Serves two operations, `search` and `fetch`, over a document
//! collection. MCP clients reach them as tools over stdio or
//! Server-Sent Events; a small REST API and a CLI expose the same
//! operations.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg
//!   - store (in-memory documents loaded from JSON)
//!   - backend (local keyword matching, remote Azure AI Search)
//!   - search (validation and timing over the active backend)
//!   - services (unified service container)
//!
//! - **mcp**: MCP adapter (depends on core)
//!   - protocol, handlers, tools, stdio server, SSE transport
//!
//! - **http**: REST adapter and router (depends on core, mounts mcp SSE)
//!
//! - **cli**: clap adapter (depends on core)

// Core domain logic (protocol-agnostic)
pub mod core;

// CLI adapter
pub mod cli;

// HTTP REST adapter
pub mod http;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{QuarryError, Result};
pub use core::services::Services;
pub use core::store::DocumentStore;
pub use core::types::*;
