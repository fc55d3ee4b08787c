//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, MCP, etc).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Documents, search results, requests
//! - **xdg**: XDG directory handling
//! - **store**: Read-only in-memory document store
//! - **backend**: Local and remote search backends
//! - **search**: Search/fetch contract over the active backend
//! - **services**: Unified service container

pub mod backend;
pub mod config;
pub mod error;
pub mod search;
pub mod services;
pub mod store;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{QuarryError, Result};
pub use services::Services;
