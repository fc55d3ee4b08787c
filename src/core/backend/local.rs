//! Keyword matching over the in-memory document store

use super::SearchBackend;
use crate::core::error::{QuarryError, Result};
use crate::core::store::DocumentStore;
use crate::core::types::{Document, SearchRequest, SearchResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Ids listed in a not-found message
const SUGGESTED_IDS: usize = 5;

pub struct LocalBackend {
    store: Arc<DocumentStore>,
    snippet_chars: usize,
}

impl LocalBackend {
    pub fn new(store: Arc<DocumentStore>, snippet_chars: usize) -> Self {
        Self {
            store,
            snippet_chars,
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    /// Documents where any query token occurs in a searchable field
    ///
    /// Results keep store insertion order; there is no ranking.
    pub fn matching(&self, query: &str) -> Vec<&Document> {
        let tokens: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if tokens.is_empty() {
            return Vec::new();
        }

        self.store
            .all()
            .iter()
            .filter(|doc| {
                let haystack = doc.searchable_text();
                tokens.iter().any(|t| haystack.contains(t.as_str()))
            })
            .collect()
    }
}

#[async_trait]
impl SearchBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let limit = request.top.map_or(usize::MAX, |top| top.max(1));

        Ok(self
            .matching(&request.query)
            .into_iter()
            .take(limit)
            .map(|doc| SearchResult::from_document(doc, self.snippet_chars))
            .collect())
    }

    async fn fetch(&self, id: &str) -> Result<Document> {
        self.store.get_by_id(id).cloned().ok_or_else(|| {
            QuarryError::DocumentNotFound(format!(
                "'{id}'. Available IDs include: {:?}",
                self.store.ids(SUGGESTED_IDS)
            ))
        })
    }

    fn document_count(&self) -> Option<usize> {
        Some(self.store.len())
    }
}
