//! Info command - show version and backend information

use crate::cli::output::format_relative_time;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// MCP revision served by the quarry server binaries
const MCP_PROTOCOL: &str = "2024-11-05";

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Show data source details
    #[arg(long, short = 'd')]
    pub detailed: bool,
}

/// Server information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub protocol: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// Execute the info command
pub async fn execute(
    args: InfoArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let info = build_info(services, args.detailed);

    match format {
        OutputFormat::Human => {
            println!("{} {}", info.name, info.version);
            println!("Protocol: MCP {}", info.protocol);
            println!("Backend: {}", info.backend);
            if let Some(count) = info.documents {
                println!("Documents: {count}");
            }
            if let Some(data_file) = &info.data_file {
                println!("Data: {data_file}");
            }
            if let Some(store) = services.store.as_ref().filter(|_| args.detailed) {
                println!("Loaded: {}", format_relative_time(&store.loaded_at()));
            }
            if let Some(index) = &info.index {
                println!("Index: {index}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

/// Collect server information from the running services
pub fn build_info(services: &Services, detailed: bool) -> InfoResponse {
    let backend = services.search.backend();
    let store = services.store.as_ref().filter(|_| detailed);

    InfoResponse {
        name: "quarry".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocol: MCP_PROTOCOL.to_string(),
        backend: backend.name().to_string(),
        documents: backend.document_count(),
        data_file: store
            .and_then(|s| s.source())
            .map(|p| p.display().to_string()),
        loaded_at: store.map(|s| s.loaded_at().to_rfc3339()),
        index: (detailed && services.store.is_none())
            .then(|| services.config.remote.index_name.clone()),
    }
}
