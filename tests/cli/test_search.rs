//! Tests for the search CLI command

use crate::cli::test_helpers::create_cli_test_services;
use quarry::cli::commands::search::{execute, SearchArgs};
use quarry::cli::OutputFormat;

fn args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        top: None,
        hybrid: false,
        ids_only: false,
    }
}

/// Test search with valid query returning results
#[tokio::test]
async fn test_search_valid_query_human() {
    let services = create_cli_test_services();

    let result = execute(args("machine learning"), &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
}

/// Test search with valid query in JSON format
#[tokio::test]
async fn test_search_valid_query_json() {
    let services = create_cli_test_services();

    let mut search = args("revenue");
    search.top = Some(1);

    let result = execute(search, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "JSON search should succeed: {:?}", result.err());
}

/// Test search with no matches
#[tokio::test]
async fn test_search_empty_results() {
    let services = create_cli_test_services();

    let result = execute(args("nonexistent_term_xyz"), &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Search with no results should succeed");
}

/// Test ids-only output
#[tokio::test]
async fn test_search_ids_only() {
    let services = create_cli_test_services();

    let mut search = args("bread");
    search.ids_only = true;

    let result = execute(search, &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}

/// Test query longer than the configured maximum
#[tokio::test]
async fn test_search_query_too_long() {
    let services = create_cli_test_services();

    let result = execute(args(&"q".repeat(501)), &services, OutputFormat::Human).await;
    let err = result.expect_err("Overlong query should fail");
    assert!(err.to_string().contains("Invalid query"));
}

/// Test hybrid search against the local backend
#[tokio::test]
async fn test_search_hybrid_unsupported_locally() {
    let services = create_cli_test_services();

    let mut search = args("revenue");
    search.hybrid = true;

    let result = execute(search, &services, OutputFormat::Human).await;
    assert!(result.is_err());
}
