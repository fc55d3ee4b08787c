//! Azure AI Search backend
//!
//! Queries are embedded through the Azure OpenAI embeddings endpoint
//! and sent as vector queries to an Azure AI Search index. Documents
//! are fetched by key from the same index. Every transport failure,
//! timeout or non-success status surfaces as `UpstreamFailed`.

use super::SearchBackend;
use crate::core::config::RemoteConfig;
use crate::core::error::{QuarryError, Result};
use crate::core::types::{make_snippet, metadata_value_to_string, Document, Metadata};
use crate::core::types::{SearchRequest, SearchResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Index fields returned with every search hit
const SEARCH_SELECT: &str = "id,title,text,url";

/// Index fields folded into a fetched document's metadata
const METADATA_FIELDS: [&str; 4] = ["category", "author", "date", "tags"];

pub struct RemoteBackend {
    http: Client,
    openai_endpoint: Url,
    openai_api_key: String,
    embedding_deployment: String,
    openai_api_version: String,
    search_endpoint: Url,
    search_api_key: String,
    index_name: String,
    search_api_version: String,
    vector_field: String,
    default_top: usize,
    max_top: usize,
    snippet_chars: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexSearchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    vector_queries: Vec<VectorQuery<'a>>,
    select: &'a str,
    top: usize,
}

#[derive(Serialize)]
struct VectorQuery<'a> {
    kind: &'static str,
    vector: Vec<f32>,
    k: usize,
    fields: &'a str,
}

#[derive(Deserialize)]
struct IndexSearchResponse {
    #[serde(default)]
    value: Vec<IndexHit>,
}

#[derive(Deserialize)]
struct IndexHit {
    id: Option<String>,
    title: Option<String>,
    text: Option<String>,
    url: Option<String>,
    #[serde(rename = "@search.score")]
    score: Option<f64>,
}

/// Index record as returned by a key lookup
#[derive(Deserialize)]
struct IndexRecord {
    id: Option<String>,
    title: Option<String>,
    text: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, Value>,
}

impl IndexRecord {
    fn into_document(self, requested_id: &str) -> Document {
        let metadata: Metadata = METADATA_FIELDS
            .iter()
            .filter_map(|field| {
                self.extra
                    .get(*field)
                    .and_then(metadata_value_to_string)
                    .map(|v| (field.to_string(), v))
            })
            .collect();

        let text = self.text.unwrap_or_default();
        Document {
            id: self.id.unwrap_or_else(|| requested_id.to_string()),
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_else(|| text.clone()),
            text,
            url: self.url.filter(|u| !u.is_empty()),
            metadata,
        }
    }
}

fn parse_endpoint(name: &str, value: &Option<String>) -> Result<Url> {
    let raw = value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| QuarryError::ConfigError(format!("{name} is not set")))?;
    Url::parse(raw.trim())
        .map_err(|e| QuarryError::ConfigError(format!("{name} is not a valid URL: {e}")))
}

fn required(name: &str, value: &Option<String>) -> Result<String> {
    value
        .clone()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| QuarryError::ConfigError(format!("{name} is not set")))
}

/// Append path segments to an endpoint, percent-encoding each one
fn endpoint_url(base: &Url, segments: &[&str], api_version: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| QuarryError::ConfigError(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    url.query_pairs_mut()
        .append_pair("api-version", api_version);
    Ok(url)
}

async fn upstream_error(context: &str, response: reqwest::Response) -> QuarryError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    QuarryError::UpstreamFailed(format!("{context} returned HTTP {status}: {body}"))
}

impl RemoteBackend {
    pub fn new(config: &RemoteConfig, snippet_chars: usize) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| QuarryError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            openai_endpoint: parse_endpoint("AZURE_OPENAI_ENDPOINT", &config.openai_endpoint)?,
            openai_api_key: required("AZURE_OPENAI_API_KEY", &config.openai_api_key)?,
            embedding_deployment: config.embedding_deployment.clone(),
            openai_api_version: config.openai_api_version.clone(),
            search_endpoint: parse_endpoint("AZURE_SEARCH_ENDPOINT", &config.search_endpoint)?,
            search_api_key: required("AZURE_SEARCH_API_KEY", &config.search_api_key)?,
            index_name: config.index_name.clone(),
            search_api_version: config.search_api_version.clone(),
            vector_field: config.vector_field.clone(),
            default_top: config.default_top,
            max_top: config.max_top,
            snippet_chars,
        })
    }

    /// Requested result count clamped to `[1, max_top]`
    pub fn effective_top(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_top)
            .clamp(1, self.max_top)
    }

    fn embeddings_url(&self) -> Result<Url> {
        endpoint_url(
            &self.openai_endpoint,
            &["openai", "deployments", &self.embedding_deployment, "embeddings"],
            &self.openai_api_version,
        )
    }

    fn search_url(&self) -> Result<Url> {
        endpoint_url(
            &self.search_endpoint,
            &["indexes", &self.index_name, "docs", "search"],
            &self.search_api_version,
        )
    }

    fn document_url(&self, id: &str) -> Result<Url> {
        endpoint_url(
            &self.search_endpoint,
            &["indexes", &self.index_name, "docs", id],
            &self.search_api_version,
        )
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .http
            .post(self.embeddings_url()?)
            .header("api-key", &self.openai_api_key)
            .json(&EmbeddingRequest { input: text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error("Embeddings endpoint", response).await);
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            QuarryError::UpstreamFailed(format!("Failed to decode embeddings response: {e}"))
        })?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                QuarryError::UpstreamFailed("Embeddings response contained no vectors".to_string())
            })
    }

    async fn query_index(
        &self,
        request: &SearchRequest,
        keyword_text: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let top = self.effective_top(request.top);
        let vector = self.embed(&request.query).await?;

        let body = IndexSearchRequest {
            search: keyword_text,
            vector_queries: vec![VectorQuery {
                kind: "vector",
                vector,
                k: top,
                fields: &self.vector_field,
            }],
            select: SEARCH_SELECT,
            top,
        };

        let response = self
            .http
            .post(self.search_url()?)
            .header("api-key", &self.search_api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error("Search index", response).await);
        }

        let parsed: IndexSearchResponse = response.json().await.map_err(|e| {
            QuarryError::UpstreamFailed(format!("Failed to decode search response: {e}"))
        })?;

        Ok(parsed
            .value
            .into_iter()
            .filter_map(|hit| {
                let id = hit.id?;
                Some(SearchResult {
                    id,
                    title: hit.title.unwrap_or_default(),
                    text: make_snippet(&hit.text.unwrap_or_default(), self.snippet_chars),
                    url: hit.url.filter(|u| !u.is_empty()),
                    score: hit.score,
                })
            })
            .collect())
    }
}

#[async_trait]
impl SearchBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        self.query_index(request, None).await
    }

    async fn fetch(&self, id: &str) -> Result<Document> {
        let response = self
            .http
            .get(self.document_url(id)?)
            .header("api-key", &self.search_api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(QuarryError::DocumentNotFound(format!("'{id}'")));
        }
        if !response.status().is_success() {
            return Err(upstream_error("Document lookup", response).await);
        }

        let record: IndexRecord = response.json().await.map_err(|e| {
            QuarryError::UpstreamFailed(format!("Failed to decode document {id}: {e}"))
        })?;

        Ok(record.into_document(id))
    }

    fn supports_hybrid(&self) -> bool {
        true
    }

    async fn hybrid_search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        self.query_index(request, Some(&request.query)).await
    }
}
