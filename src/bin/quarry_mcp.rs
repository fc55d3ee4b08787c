//! Quarry MCP (Model Context Protocol) server over stdio
//!
//! Exposes document search and fetch as tools for MCP clients that
//! launch the server as a subprocess.

use quarry::core::config::Config;
use quarry::core::services::Services;
use quarry::core::xdg::{migrate_legacy_paths, XdgDirs};
use quarry::mcp::McpServer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries the protocol
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quarry=info")),
        )
        .with_ansi(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let xdg = XdgDirs::new();
    tracing::debug!("XDG directories initialized");

    if let Err(e) = xdg.ensure_dirs_exist() {
        eprintln!("Failed to create XDG directories: {e}");
        std::process::exit(1);
    }

    if let Err(e) = migrate_legacy_paths(&xdg) {
        tracing::warn!("Migration warning: {}", e);
    }

    let config = Config::load_with_xdg(&xdg).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });
    config.log_config();

    let services = Services::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to initialize search backend: {e}");
        std::process::exit(1);
    });

    let mut server = McpServer::new(Arc::new(services));

    if let Err(e) = server.run().await {
        eprintln!("MCP server error: {e}");
        std::process::exit(1);
    }
}
