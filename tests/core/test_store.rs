// Integration tests for loading the document store

use crate::common::{DataFile, SAMPLE_JSON};
use quarry::core::error::QuarryError;
use quarry::core::store::DocumentStore;

#[test]
fn test_load_wrapped_records() {
    let data = DataFile::sample();
    let store = DocumentStore::load(data.path()).expect("Load failed");

    assert_eq!(store.len(), 3);
    assert_eq!(store.source(), Some(data.path()));

    let ids: Vec<&str> = store.all().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["doc1", "doc2", "doc3"]);
}

#[test]
fn test_load_bare_array() {
    let data = DataFile::with_contents(
        r#"[{"id": "a", "title": "Alpha", "text": "first"},
            {"id": "b", "title": "Beta", "text": "second"}]"#,
    );
    let store = DocumentStore::load(data.path()).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn test_load_normalizes_records() {
    let store = DocumentStore::from_json(SAMPLE_JSON).unwrap();

    // Empty url becomes absent
    assert_eq!(store.get_by_id("doc3").unwrap().url, None);

    // Array metadata is flattened to a string
    assert_eq!(
        store.get_by_id("doc2").unwrap().metadata.get("tags").map(String::as_str),
        Some("revenue, q3")
    );
}

#[test]
fn test_load_missing_file() {
    let result = DocumentStore::load("/nonexistent/quarry/records.json");
    assert!(matches!(result, Err(QuarryError::DataSource(_))));
}

#[test]
fn test_load_malformed_file() {
    let data = DataFile::with_contents("{\"records\": [");
    let result = DocumentStore::load(data.path());
    assert!(matches!(result, Err(QuarryError::DataSource(_))));
}

#[test]
fn test_load_rejects_duplicate_ids() {
    let data = DataFile::with_contents(
        r#"[{"id": "same", "title": "One", "text": "x"},
            {"id": "same", "title": "Two", "text": "y"}]"#,
    );
    let result = DocumentStore::load(data.path());
    assert!(matches!(result, Err(QuarryError::DuplicateDocument(id)) if id == "same"));
}

#[test]
fn test_load_empty_collection() {
    let data = DataFile::with_contents(r#"{"records": []}"#);
    let store = DocumentStore::load(data.path()).unwrap();
    assert!(store.is_empty());
}
