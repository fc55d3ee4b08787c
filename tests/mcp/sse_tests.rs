//! SSE transport tests
//!
//! Exercises the `GET /sse` + `POST /messages/` exchange against a live
//! listener, plus the error statuses of the message endpoint.

use crate::common::create_test_services;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use quarry::mcp::sse;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt as TowerServiceExt;

/// Read SSE frames until one with the given event name arrives
async fn next_event(response: &mut reqwest::Response, buffer: &mut String, name: &str) -> String {
    let marker = format!("event: {name}\n");
    loop {
        if let Some(start) = buffer.find(&marker) {
            if let Some(end) = buffer[start..].find("\n\n") {
                let frame = buffer[start..start + end].to_string();
                buffer.drain(..start + end + 2);
                return frame
                    .lines()
                    .filter_map(|line| line.strip_prefix("data: "))
                    .collect::<Vec<_>>()
                    .join("\n");
            }
        }

        let chunk = tokio::time::timeout(Duration::from_secs(5), response.chunk())
            .await
            .expect("Timed out waiting for SSE event")
            .expect("SSE stream failed")
            .expect("SSE stream ended");
        buffer.push_str(&String::from_utf8_lossy(&chunk));
    }
}

async fn spawn_server() -> String {
    let app = sse::router(Arc::new(create_test_services()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_sse_round_trip() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let mut stream = client.get(format!("{base}/sse")).send().await.unwrap();
    assert_eq!(stream.status(), 200);
    assert!(stream.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let mut buffer = String::new();
    let endpoint = next_event(&mut stream, &mut buffer, "endpoint").await;
    assert!(endpoint.starts_with("/messages/?session_id="));

    let post = client
        .post(format!("{base}{endpoint}"))
        .header("content-type", "application/json")
        .body(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(post.status(), 202);

    let message: Value =
        serde_json::from_str(&next_event(&mut stream, &mut buffer, "message").await).unwrap();
    assert_eq!(message["id"], 1);
    assert_eq!(message["result"]["serverInfo"]["name"], "quarry");

    let post = client
        .post(format!("{base}{endpoint}"))
        .body(r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"search","arguments":{"query":"sourdough"}}}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(post.status(), 202);

    let message: Value =
        serde_json::from_str(&next_event(&mut stream, &mut buffer, "message").await).unwrap();
    assert_eq!(message["id"], 2);
    assert_eq!(
        message["result"]["structuredContent"]["results"][0]["id"],
        "doc3"
    );
}

#[tokio::test]
async fn test_message_without_session_id() {
    let app = sse::router(Arc::new(create_test_services()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/messages/")
                .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_message_unknown_session() {
    let app = sse::router(Arc::new(create_test_services()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/messages/?session_id=does-not-exist")
                .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
