//! Search and fetch over the active backend.
//!
//! This module provides the SearchService, which validates input,
//! delegates to the configured backend and records timing.

use crate::core::backend::SearchBackend;
use crate::core::error::{QuarryError, Result};
use crate::core::types::{Document, SearchRequest, SearchResponse, SearchResult};
use std::sync::Arc;
use std::time::Instant;

/// Public search/fetch contract
pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
    max_query_length: usize,
}

impl SearchService {
    /// Create a new search service
    pub fn new(backend: Arc<dyn SearchBackend>, max_query_length: usize) -> Self {
        Self {
            backend,
            max_query_length,
        }
    }

    pub fn backend(&self) -> &Arc<dyn SearchBackend> {
        &self.backend
    }

    /// Execute a search query
    ///
    /// A blank query yields an empty response without touching the backend.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.run_search(request, false).await
    }

    /// Execute a combined keyword and vector query
    pub async fn hybrid_search(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.run_search(request, true).await
    }

    async fn run_search(&self, request: SearchRequest, hybrid: bool) -> Result<SearchResponse> {
        let start = Instant::now();

        if request.query.trim().is_empty() {
            return Ok(SearchResponse {
                query: request.query,
                results: Vec::new(),
                count: 0,
                duration_ms: 0,
            });
        }

        let query_chars = request.query.chars().count();
        if query_chars > self.max_query_length {
            return Err(QuarryError::InvalidQuery(format!(
                "Query is {query_chars} characters long (max {})",
                self.max_query_length
            )));
        }

        let outcome = if hybrid {
            self.backend.hybrid_search(&request).await
        } else {
            self.backend.search(&request).await
        };

        let results: Vec<SearchResult> = outcome.map_err(|e| {
            tracing::error!(query = %request.query, backend = self.backend.name(), "Search error: {}", e);
            e
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Search query '{}' returned {} results ({}ms, {} backend{})",
            request.query,
            results.len(),
            duration_ms,
            self.backend.name(),
            if hybrid { ", hybrid" } else { "" }
        );

        Ok(SearchResponse {
            query: request.query,
            count: results.len(),
            results,
            duration_ms,
        })
    }

    /// Retrieve a full document by id
    ///
    /// The id is passed through unchanged; stored ids may carry whitespace.
    pub async fn fetch(&self, id: &str) -> Result<Document> {
        if id.trim().is_empty() {
            return Err(QuarryError::InvalidId("Document ID is required".to_string()));
        }

        match self.backend.fetch(id).await {
            Ok(doc) => {
                tracing::info!("Fetched document with ID: {}", id);
                Ok(doc)
            }
            Err(e) => {
                tracing::warn!(id = %id, backend = self.backend.name(), "Fetch error: {}", e);
                Err(e)
            }
        }
    }
}
