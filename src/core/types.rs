//! Core data types for the Quarry document server.
//!
//! This module defines the data structures shared by the store, the
//! search backends and every adapter: documents, search results,
//! requests, and responses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// String metadata attached to a document (category, author, date, tags)
pub type Metadata = BTreeMap<String, String>;

/// A retrievable unit of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within the store
    pub id: String,

    /// Document title
    pub title: String,

    /// Short excerpt shown in search results
    pub text: String,

    /// Full body returned on fetch
    pub content: String,

    /// Source citation link
    #[serde(default)]
    pub url: Option<String>,

    /// Opaque string metadata
    #[serde(default, deserialize_with = "deserialize_metadata")]
    pub metadata: Metadata,
}

impl Document {
    /// Lowercased concatenation of every searchable field
    pub fn searchable_text(&self) -> String {
        let mut fields: Vec<&str> = vec![&self.title, &self.text, &self.content];
        fields.extend(self.metadata.values().map(String::as_str));
        fields.join(" ").to_lowercase()
    }
}

/// Compact projection of a document returned by search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub text: String,
    pub url: Option<String>,

    /// Relevance score reported by the remote backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    /// Project a document into a search result with a snippet of its text
    pub fn from_document(doc: &Document, snippet_chars: usize) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            text: make_snippet(&doc.text, snippet_chars),
            url: doc.url.clone(),
            score: None,
        }
    }
}

/// Request to search the document collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,

    /// Maximum number of results (optional)
    #[serde(default)]
    pub top: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top: None,
        }
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }
}

/// Wire payload for search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub results: Vec<SearchResult>,
}

/// Response from a search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Matching documents
    pub results: Vec<SearchResult>,

    /// Number of results
    pub count: usize,

    /// Time spent in the backend
    pub duration_ms: u64,
}

impl SearchResponse {
    /// Strip service bookkeeping, keeping only what clients receive
    pub fn into_payload(self) -> SearchPayload {
        SearchPayload {
            results: self.results,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub documents: Option<usize>,
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`
pub fn make_snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Render a loosely-typed JSON metadata value as an opaque string
///
/// Returns `None` for `null` so absent values never show up as `"null"`.
pub fn metadata_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(metadata_value_to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

fn deserialize_metadata<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(|(k, v)| metadata_value_to_string(v).map(|s| (k.clone(), s)))
        .collect())
}
