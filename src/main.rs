//! Quarry HTTP server entry point
//!
//! Serves MCP over Server-Sent Events alongside the REST API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quarry::core::config::Config;
use quarry::core::services::Services;
use quarry::core::xdg::{migrate_legacy_paths, XdgDirs};
use quarry::http;
use quarry::mcp::sse;

/// Human-readable logs by default; `QUARRY_LOG_FORMAT=json` for structured output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quarry=info,tower_http=debug".into());
    let json = std::env::var("QUARRY_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting quarry document server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    if let Err(e) = migrate_legacy_paths(&xdg) {
        tracing::warn!("Migration warning: {}", e);
        tracing::info!("Continuing with current paths...");
    }

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let services = match Services::new(config.clone()) {
        Ok(services) => Arc::new(services),
        Err(e) => {
            tracing::error!("Failed to initialize {} backend: {}", config.backend.kind, e);
            std::process::exit(1);
        }
    };

    let app = http::build_router(Arc::clone(&services), sse::router(services));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "MCP endpoint at http://{}{} - health check at http://{}/health",
        addr,
        config.server.sse_path,
        addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}
