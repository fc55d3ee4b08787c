//! Search backends
//!
//! A backend answers the two public operations. The local backend
//! matches keywords against the in-memory store; the remote backend
//! delegates to an Azure AI Search index using Azure OpenAI
//! embeddings. Exactly one is active, chosen from `BackendKind` at
//! startup.

pub mod local;
pub mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

use crate::core::error::{QuarryError, Result};
use crate::core::types::{Document, SearchRequest, SearchResult};
use async_trait::async_trait;

/// Search/fetch contract shared by every backend
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short name reported by health checks and server info
    fn name(&self) -> &'static str;

    /// Find documents matching a non-empty query
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;

    /// Retrieve a full document by id
    async fn fetch(&self, id: &str) -> Result<Document>;

    /// Whether `hybrid_search` is available
    fn supports_hybrid(&self) -> bool {
        false
    }

    /// Combined keyword and vector search
    async fn hybrid_search(&self, _request: &SearchRequest) -> Result<Vec<SearchResult>> {
        Err(QuarryError::Unsupported(format!(
            "hybrid search is not available on the {} backend",
            self.name()
        )))
    }

    /// Number of documents held in process, when known
    fn document_count(&self) -> Option<usize> {
        None
    }
}
