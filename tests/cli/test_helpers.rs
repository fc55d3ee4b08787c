//! CLI test helpers
//!
//! Arc<Services> wrappers matching CLI execute() signatures.

use crate::common::{create_remote_services, create_test_services};
use quarry::core::services::Services;
use std::sync::Arc;

/// Local-backend services over the sample documents
pub fn create_cli_test_services() -> Arc<Services> {
    Arc::new(create_test_services())
}

/// Remote-backend services that never reach a real endpoint
#[allow(dead_code)] // Used by some test modules only
pub fn create_cli_remote_services() -> Arc<Services> {
    Arc::new(create_remote_services("http://127.0.0.1:9"))
}
