// Test fixtures for integration testing

use std::io::Write;
use tempfile::NamedTempFile;

/// Small document collection in the wrapped `{"records": [...]}` layout
#[allow(dead_code)] // Used in integration tests
pub const SAMPLE_JSON: &str = r#"{
  "records": [
    {
      "id": "doc1",
      "title": "Machine Learning Basics",
      "text": "An introduction to machine learning concepts.",
      "content": "Machine learning lets systems learn from data. This guide covers neural networks, decision trees and evaluation.",
      "url": "https://example.com/ml-basics",
      "metadata": {"category": "ai", "author": "Dana Reyes"}
    },
    {
      "id": "doc2",
      "title": "Quarterly Revenue Report",
      "text": "Revenue grew twelve percent in the third quarter.",
      "content": "Revenue grew twelve percent in the third quarter, driven by subscription renewals.",
      "metadata": {"category": "finance", "tags": ["revenue", "q3"]}
    },
    {
      "id": "doc3",
      "title": "Sourdough at Home",
      "text": "Baking bread with a wild yeast starter.",
      "content": "Feed the starter twice a day. Bake at a high temperature for a crisp crust.",
      "url": "",
      "metadata": {"category": "cooking"}
    }
  ]
}"#;

/// Temporary data file kept alive for the duration of a test
#[allow(dead_code)] // Used in integration tests
pub struct DataFile {
    pub file: NamedTempFile,
}

impl DataFile {
    #[allow(dead_code)] // Used in integration tests
    pub fn with_contents(contents: &str) -> Self {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write data file");
        Self { file }
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn sample() -> Self {
        Self::with_contents(SAMPLE_JSON)
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

/// Parsed sample documents
#[allow(dead_code)] // Used in integration tests
pub fn sample_documents() -> quarry::DocumentStore {
    quarry::DocumentStore::from_json(SAMPLE_JSON).expect("Sample data should parse")
}
