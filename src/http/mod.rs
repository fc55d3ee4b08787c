//! HTTP REST adapter
//!
//! Depends only on core/. Never imports from mcp/; the server binary
//! hands the MCP SSE routes in to be mounted on the same router.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

/// REST routes without middleware
pub fn api_router(services: Arc<Services>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/search", post(search_handler))
        .route("/api/v1/documents/:id", get(fetch_handler))
        .with_state(services)
}

/// Build the full application router, mounting `extra` routes beside the API
pub fn build_router(services: Arc<Services>, extra: Router) -> Router {
    api_router(services)
        .merge(extra)
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
}
