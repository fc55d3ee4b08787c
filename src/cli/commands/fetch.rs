//! Fetch command - print a complete document

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Document id, as returned by search
    pub id: String,
}

/// Execute the fetch command
pub async fn execute(
    args: FetchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = services.search.fetch(&args.id).await?;

    match format {
        OutputFormat::Human => {
            print_header(&document.title);
            println!("{} {}", colors::label("id:"), colors::doc_id(&document.id));
            if let Some(url) = &document.url {
                println!("{} {}", colors::label("url:"), colors::link(url));
            }
            for (key, value) in &document.metadata {
                println!("{} {}", colors::label(&format!("{key}:")), value);
            }
            println!();
            println!("{}", document.content);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
