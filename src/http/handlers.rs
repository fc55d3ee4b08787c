//! HTTP request handlers for the document API
//!
//! Health, search and document retrieval over the active backend.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::QuarryError;
use crate::core::services::Services;
use crate::core::types::{Document, HealthResponse, SearchPayload, SearchRequest};

/// Health check handler
///
/// Returns server status, version and the active backend.
pub async fn health_handler(State(services): State<Arc<Services>>) -> Json<HealthResponse> {
    let backend = services.search.backend();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: backend.name().to_string(),
        documents: backend.document_count(),
    })
}

/// Search handler
///
/// # Errors
///
/// - `InvalidQuery`: Query exceeds the configured length
/// - `UpstreamFailed`: Remote search service failed
pub async fn search_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchPayload>, QuarryError> {
    let response = services.search.search(req).await?;
    Ok(Json(response.into_payload()))
}

/// Document retrieval handler
///
/// # Errors
///
/// - `DocumentNotFound`: No document with this id
/// - `InvalidId`: Id is blank
pub async fn fetch_handler(
    State(services): State<Arc<Services>>,
    Path(id): Path<String>,
) -> Result<Json<Document>, QuarryError> {
    let document = services.search.fetch(&id).await?;
    Ok(Json(document))
}
