//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.
//! Command names match MCP tool names (underscores become hyphens in CLI).

pub mod completions;
pub mod config;
pub mod fetch;
pub mod info;
pub mod list;
pub mod search;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use fetch::FetchArgs;
pub use info::InfoArgs;
pub use list::ListArgs;
pub use search::SearchArgs;
