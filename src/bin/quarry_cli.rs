//! Quarry CLI - command-line access to document search
//!
//! Runs the same search and fetch operations the MCP tools expose,
//! for scripting or manual use without an MCP client.
//!
//! # Examples
//!
//! ```bash
//! # Search documents
//! quarry search "neural networks" --top 3
//!
//! # Fetch a document
//! quarry fetch doc1 --format json
//!
//! # Show configuration
//! quarry show-config
//! ```

use clap::Parser;
use quarry::cli::{output, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
