//! CLI adapter for Quarry
//!
//! Provides a command-line interface to the same search and fetch
//! operations the MCP tools expose. This module is parallel to `mcp/`
//! and `http/`: all three depend on `core/` but not on each other.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Quarry - document search for AI assistants
///
/// Search and fetch documents from the configured backend: a local
/// JSON data file or a remote Azure AI Search index.
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(version)]
#[command(about = "Document search and retrieval", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
///
/// Command names match MCP tool names (underscores become hyphens).
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search documents
    Search(commands::SearchArgs),

    /// Fetch a complete document by id
    Fetch(commands::FetchArgs),

    /// List document ids held by the local backend
    #[command(name = "list-documents")]
    ListDocuments(commands::ListArgs),

    /// Show current configuration (API keys redacted)
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Show version and backend information
    #[command(name = "get-server-info")]
    GetServerInfo(commands::InfoArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  quarry completions bash > ~/.local/share/bash-completion/completions/quarry
    ///   zsh:   quarry completions zsh > ~/.zfunc/_quarry
    ///   fish:  quarry completions fish > ~/.config/fish/completions/quarry.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::{migrate_legacy_paths, XdgDirs};
    use std::sync::Arc;

    // Commands that need no backend
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;

    if let Err(e) = migrate_legacy_paths(&xdg) {
        output::print_warning(&format!("Migration issue: {e}"));
    }

    let config = Config::load_with_xdg(&xdg)?;

    if let Commands::ShowConfig(args) = command {
        return commands::config::execute(args, &config, cli.format);
    }

    let services = Arc::new(Services::new(config)?);

    match command {
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::Fetch(args) => commands::fetch::execute(args, &services, cli.format).await,
        Commands::ListDocuments(args) => commands::list::execute(args, &services, cli.format).await,
        Commands::GetServerInfo(args) => commands::info::execute(args, &services, cli.format).await,
        Commands::ShowConfig(_) | Commands::Completions(_) => Ok(()), // Handled above
    }
}
