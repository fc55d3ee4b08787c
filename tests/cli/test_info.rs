//! Tests for get-server-info and show-config CLI commands
//!
//! These are simple commands that display static/config information.

use crate::cli::test_helpers::{create_cli_remote_services, create_cli_test_services};
use quarry::cli::commands::config::{config_view, execute as execute_config, ConfigArgs};
use quarry::cli::commands::info::{build_info, execute as execute_info, InfoArgs};
use quarry::cli::OutputFormat;
use quarry::core::config::Config;

// =============================================================================
// get-server-info tests
// =============================================================================

/// Test getting server info (human format)
#[tokio::test]
async fn test_server_info_human() {
    let services = create_cli_test_services();

    let args = InfoArgs { detailed: false };
    let result = execute_info(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Get server info should succeed");
}

/// Test getting server info (JSON format)
#[tokio::test]
async fn test_server_info_json() {
    let services = create_cli_test_services();

    let args = InfoArgs { detailed: true };
    let result = execute_info(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Get server info (JSON) should succeed");
}

#[test]
fn test_build_info_local() {
    let services = create_cli_test_services();

    let info = build_info(&services, true);
    assert_eq!(info.name, "quarry");
    assert_eq!(info.backend, "local");
    assert_eq!(info.documents, Some(3));
    assert!(info.loaded_at.is_some());
    assert!(info.index.is_none());
}

#[test]
fn test_build_info_remote() {
    let services = create_cli_remote_services();

    let info = build_info(&services, true);
    assert_eq!(info.backend, "remote");
    assert_eq!(info.documents, None);
    assert_eq!(info.index.as_deref(), Some("documents-index"));
}

// =============================================================================
// show-config tests
// =============================================================================

/// Test showing config (human format)
#[test]
fn test_show_config_human() {
    let args = ConfigArgs { all: false };
    let result = execute_config(args, &Config::default(), OutputFormat::Human);
    assert!(result.is_ok(), "Show config should succeed");
}

/// Test showing config (JSON format)
#[test]
fn test_show_config_json() {
    let args = ConfigArgs { all: true };
    let result = execute_config(args, &Config::default(), OutputFormat::Json);
    assert!(result.is_ok(), "Show config (JSON) should succeed");
}

/// API keys never appear in show-config output
#[test]
fn test_show_config_redacts_remote_keys() {
    let services = create_cli_remote_services();

    let view = config_view(&services.config, false).unwrap();
    let rendered = view.to_string();
    assert!(!rendered.contains("openai-test-key"));
    assert!(!rendered.contains("search-test-key"));
    assert_eq!(view["remote"]["index_name"], "documents-index");
}
