//! In-memory document store
//!
//! Documents are loaded once from a JSON data file and never mutated
//! afterwards, so a store can be shared across request handlers
//! through an `Arc` without synchronization.

use crate::core::error::{QuarryError, Result};
use crate::core::types::{metadata_value_to_string, Document, Metadata};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Document record as it appears in the data file
///
/// Every field except `id` may be missing; `normalize` fills the gaps.
#[derive(Debug, Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    id: String,
    title: Option<String>,
    text: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(default)]
    metadata: Option<BTreeMap<String, Value>>,
}

impl DocumentRecord {
    fn normalize(self) -> Document {
        let title = self
            .title
            .unwrap_or_else(|| format!("Document {}", self.id));
        let text = self
            .text
            .or_else(|| self.content.clone())
            .unwrap_or_default();
        let content = self.content.unwrap_or_else(|| text.clone());
        let metadata: Metadata = self
            .metadata
            .unwrap_or_default()
            .iter()
            .filter_map(|(k, v)| metadata_value_to_string(v).map(|s| (k.clone(), s)))
            .collect();

        Document {
            id: self.id,
            title,
            text,
            content,
            url: self.url.filter(|u| !u.is_empty()),
            metadata,
        }
    }
}

/// Accepted shapes of the data file
#[derive(Deserialize)]
#[serde(untagged)]
enum DataFile {
    Wrapped { records: Vec<DocumentRecord> },
    Bare(Vec<DocumentRecord>),
}

/// Read-only document collection keyed by id
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Vec<Document>,
    index: HashMap<String, usize>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl DocumentStore {
    /// Build a store from documents, rejecting empty or duplicate ids
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        let mut index = HashMap::with_capacity(documents.len());

        for (position, doc) in documents.iter().enumerate() {
            if doc.id.trim().is_empty() {
                return Err(QuarryError::DataSource(format!(
                    "record {position} has an empty id"
                )));
            }
            if index.insert(doc.id.clone(), position).is_some() {
                return Err(QuarryError::DuplicateDocument(doc.id.clone()));
            }
        }

        Ok(Self {
            documents,
            index,
            source: None,
            loaded_at: Utc::now(),
        })
    }

    /// Parse a store from the JSON text of a data file
    pub fn from_json(json: &str) -> Result<Self> {
        let data: DataFile = serde_json::from_str(json)
            .map_err(|e| QuarryError::DataSource(format!("Invalid data file: {e}")))?;

        let records = match data {
            DataFile::Wrapped { records } => records,
            DataFile::Bare(records) => records,
        };

        Self::from_documents(records.into_iter().map(DocumentRecord::normalize).collect())
    }

    /// Load the store from a JSON data file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            QuarryError::DataSource(format!("Failed to read {}: {e}", path.display()))
        })?;

        let mut store = Self::from_json(&contents)?;
        store.source = Some(path.to_path_buf());

        tracing::info!(
            "Loaded {} documents from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Exact-key lookup
    pub fn get_by_id(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&i| &self.documents[i])
    }

    /// All documents in insertion order
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    /// First `limit` ids, in insertion order
    pub fn ids(&self, limit: usize) -> Vec<&str> {
        self.documents
            .iter()
            .take(limit)
            .map(|d| d.id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Data file the store was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
