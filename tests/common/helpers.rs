// Test helper functions

use super::fixtures::sample_documents;
use quarry::core::config::{BackendKind, Config};
use quarry::core::services::Services;

/// Create local-backend services over the sample documents
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> Services {
    Services::with_store(Config::default(), sample_documents())
}

/// Remote configuration pointing both services at `base_url`
#[allow(dead_code)] // Used in integration tests
pub fn remote_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.backend.kind = BackendKind::Remote;
    config.remote.openai_endpoint = Some(base_url.to_string());
    config.remote.openai_api_key = Some("openai-test-key".to_string());
    config.remote.search_endpoint = Some(base_url.to_string());
    config.remote.search_api_key = Some("search-test-key".to_string());
    config.remote.index_name = "documents-index".to_string();
    config.remote.timeout_sec = 5;
    config
}

/// Create remote-backend services talking to a mock server
#[allow(dead_code)] // Used in integration tests
pub fn create_remote_services(base_url: &str) -> Services {
    Services::new(remote_config(base_url)).expect("Remote services should build")
}
