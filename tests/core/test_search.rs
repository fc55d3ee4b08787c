// Integration tests for search and fetch over the local backend

use crate::common::create_test_services;
use quarry::core::config::Config;
use quarry::core::error::QuarryError;
use quarry::core::services::Services;
use quarry::core::store::DocumentStore;
use quarry::core::types::SearchRequest;

#[tokio::test]
async fn test_search_single_keyword() {
    let services = create_test_services();

    let response = services
        .search
        .search(SearchRequest::new("neural"))
        .await
        .expect("Search failed");

    assert_eq!(response.count, 1);
    let result = &response.results[0];
    assert_eq!(result.id, "doc1");
    assert_eq!(result.title, "Machine Learning Basics");
    assert_eq!(result.url.as_deref(), Some("https://example.com/ml-basics"));
    assert!(result.score.is_none());
}

#[tokio::test]
async fn test_search_any_keyword_keeps_collection_order() {
    let services = create_test_services();

    let response = services
        .search
        .search(SearchRequest::new("starter REVENUE"))
        .await
        .unwrap();

    let ids: Vec<&str> = response.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["doc2", "doc3"]);
}

#[tokio::test]
async fn test_search_matches_metadata() {
    let services = create_test_services();

    let response = services
        .search
        .search(SearchRequest::new("reyes"))
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].id, "doc1");
}

#[tokio::test]
async fn test_search_top_limits_results() {
    let services = create_test_services();

    let response = services
        .search
        .search(SearchRequest::new("revenue machine").with_top(1))
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].id, "doc1");
}

#[tokio::test]
async fn test_search_no_match() {
    let services = create_test_services();

    let response = services
        .search
        .search(SearchRequest::new("quantum"))
        .await
        .unwrap();

    assert!(response.results.is_empty());
}

#[tokio::test]
async fn test_search_blank_query() {
    let services = create_test_services();

    let response = services
        .search
        .search(SearchRequest::new("   "))
        .await
        .unwrap();

    assert!(response.results.is_empty());
    assert_eq!(response.count, 0);
}

#[tokio::test]
async fn test_search_query_too_long() {
    let services = create_test_services();

    let result = services
        .search
        .search(SearchRequest::new("a".repeat(501)))
        .await;

    assert!(matches!(result, Err(QuarryError::InvalidQuery(_))));
}

#[tokio::test]
async fn test_fetch_full_document() {
    let services = create_test_services();

    let doc = services.search.fetch("doc2").await.unwrap();

    assert_eq!(doc.title, "Quarterly Revenue Report");
    assert!(doc.content.contains("subscription renewals"));
    assert_eq!(doc.metadata.get("category").map(String::as_str), Some("finance"));
}

#[tokio::test]
async fn test_fetch_unknown_lists_available_ids() {
    let services = create_test_services();

    let err = services.search.fetch("doc999").await.unwrap_err();

    assert!(err.is_not_found());
    let message = err.to_string();
    assert!(message.contains("doc999"));
    assert!(message.contains("doc1"));
}

#[tokio::test]
async fn test_fetch_blank_id() {
    let services = create_test_services();

    let result = services.search.fetch("  ").await;
    assert!(matches!(result, Err(QuarryError::InvalidId(_))));
}

#[tokio::test]
async fn test_hybrid_search_unsupported_locally() {
    let services = create_test_services();

    let result = services
        .search
        .hybrid_search(SearchRequest::new("revenue"))
        .await;

    assert!(matches!(result, Err(QuarryError::Unsupported(_))));
}

#[tokio::test]
async fn test_fetch_returns_every_stored_document() {
    let store = DocumentStore::from_json(
        r#"[
            {"id": "doc1", "title": "A"},
            {"id": "doc1 ", "title": "B"},
            {"id": " padded", "title": "C"}
        ]"#,
    )
    .unwrap();
    let stored = store.all().to_vec();
    let services = Services::with_store(Config::default(), store);

    for doc in &stored {
        let fetched = services.search.fetch(&doc.id).await.unwrap();
        assert_eq!(&fetched, doc, "fetch({:?}) returned the wrong document", doc.id);
    }
}

#[tokio::test]
async fn test_fetch_round_trips_sample_collection() {
    let services = create_test_services();
    let store = services.store.clone().unwrap();

    for doc in store.all() {
        assert_eq!(&services.search.fetch(&doc.id).await.unwrap(), doc);
    }
}

#[tokio::test]
async fn test_fetch_is_idempotent() {
    let services = create_test_services();

    let first = services.search.fetch("doc1").await.unwrap();
    let second = services.search.fetch("doc1").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
