//! Search command - search documents on the active backend

use crate::cli::output::{colors, format_duration_ms, truncate_display};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::SearchRequest;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (space-separated keywords for the local backend)
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 't')]
    pub top: Option<usize>,

    /// Combine keyword and vector matching (remote backend only)
    #[arg(long)]
    pub hybrid: bool,

    /// Only show document ids
    #[arg(long)]
    pub ids_only: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub backend: String,
    pub total_results: usize,
    pub duration_ms: u64,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = SearchRequest {
        query: args.query.clone(),
        top: args.top,
    };

    let response = if args.hybrid {
        services.search.hybrid_search(request).await?
    } else {
        services.search.search(request).await?
    };

    let output = SearchResponseOutput {
        query: args.query.clone(),
        backend: services.backend_name().to_string(),
        total_results: response.count,
        duration_ms: response.duration_ms,
        results: response
            .results
            .into_iter()
            .enumerate()
            .map(|(i, r)| SearchResultItem {
                rank: i + 1,
                id: r.id,
                title: r.title,
                text: if args.ids_only { None } else { Some(r.text) },
                url: r.url,
                score: r.score,
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => print_human(&output, args.ids_only),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_human(output: &SearchResponseOutput, ids_only: bool) {
    if output.results.is_empty() {
        println!("No results found for '{}'", colors::label(&output.query));
        return;
    }

    if ids_only {
        for result in &output.results {
            println!("{}", result.id);
        }
        return;
    }

    println!(
        "Found {} result(s) ({}, {} backend):\n",
        colors::number(&output.total_results.to_string()),
        format_duration_ms(output.duration_ms),
        output.backend
    );

    for result in &output.results {
        let score = result
            .score
            .map(|s| format!(" {}", colors::score(&format!("(score: {s:.2})"))))
            .unwrap_or_default();
        println!(
            "[{}] {} {}{}",
            colors::rank(&result.rank.to_string()),
            colors::doc_id(&result.id),
            colors::label(&result.title),
            score
        );
        if let Some(url) = &result.url {
            println!("    {}", colors::link(url));
        }
        if let Some(text) = &result.text {
            for line in text.lines().take(3) {
                println!("    {}", colors::dim(&truncate_display(line, 100)));
            }
        }
        println!();
    }
}
