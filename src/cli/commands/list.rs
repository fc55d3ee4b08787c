//! List command - list documents held by the local backend

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the list-documents command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of documents to list
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DocumentEntry {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub total: usize,
    pub documents: Vec<DocumentEntry>,
}

/// Execute the list-documents command
pub async fn execute(
    args: ListArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = services.store.as_ref() else {
        return Err(format!(
            "list-documents needs the local backend (active backend: {})",
            services.backend_name()
        )
        .into());
    };

    let limit = args.limit.unwrap_or(usize::MAX);
    let output = ListOutput {
        total: store.len(),
        documents: store
            .all()
            .iter()
            .take(limit)
            .map(|doc| DocumentEntry {
                id: doc.id.clone(),
                title: doc.title.clone(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if output.documents.is_empty() {
                println!("No documents loaded");
            } else {
                println!(
                    "{} document(s):\n",
                    colors::number(&output.total.to_string())
                );
                for doc in &output.documents {
                    println!("  {}  {}", colors::doc_id(&doc.id), doc.title);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
