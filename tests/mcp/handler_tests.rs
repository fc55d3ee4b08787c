//! MCP handler tests
//!
//! Drives full JSON-RPC exchanges through `ProtocolHandlers`.

#[cfg(test)]
mod tests {
    use crate::common::{create_remote_services, create_test_services};
    use serde_json::{json, Value};
    use quarry::mcp::handlers::ProtocolHandlers;
    use quarry::mcp::protocol::*;
    use std::sync::Arc;

    fn create_test_handlers() -> ProtocolHandlers {
        ProtocolHandlers::new(Arc::new(create_test_services()))
    }

    fn tool_call(id: i64, name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: "tools/call".to_string(),
            params: Some(json!({"name": name, "arguments": arguments})),
        }
    }

    #[tokio::test]
    async fn test_initialize_handler() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: "initialize".to_string(),
            params: Some(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "clientInfo": {"name": "test", "version": "1.0"}
            })),
        };

        let response = handlers.handle_initialize(request).await.unwrap();

        assert_eq!(response.jsonrpc, "2.0");
        assert!(response.error.is_none());

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "quarry");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_initialized_handler() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "initialized".to_string(),
            params: Some(json!({})),
        };

        let response = handlers.handle_initialized(request).await.unwrap();

        assert!(response.is_empty());
        assert!(handlers.is_initialized());
    }

    #[tokio::test]
    async fn test_tools_list_local_backend() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(2)),
            method: "tools/list".to_string(),
            params: None,
        };

        let response = handlers.handle_tools_list(request).await.unwrap();

        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["fetch", "get_server_info", "search"]);

        for tool in result["tools"].as_array().unwrap() {
            assert_eq!(tool["inputSchema"]["type"], "object");
            assert!(!tool["description"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_tools_list_remote_backend_adds_hybrid() {
        let handlers = ProtocolHandlers::new(Arc::new(create_remote_services(
            "http://127.0.0.1:9",
        )));

        assert_eq!(
            handlers.tools().names(),
            vec!["fetch", "get_server_info", "hybrid_search", "search"]
        );
    }

    #[tokio::test]
    async fn test_tools_call_search() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(tool_call(3, "search", json!({"query": "neural"})))
            .await
            .unwrap();

        assert!(response.error.is_none(), "Unexpected error: {:?}", response.error);
        let result = response.result.unwrap();

        assert_eq!(
            result["structuredContent"],
            json!({"results": [{
                "id": "doc1",
                "title": "Machine Learning Basics",
                "text": "An introduction to machine learning concepts.",
                "url": "https://example.com/ml-basics"
            }]})
        );

        // Text block carries the same payload
        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, result["structuredContent"]);
        assert_eq!(result["content"][0]["type"], "text");
    }

    #[tokio::test]
    async fn test_tools_call_search_no_results() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(tool_call(4, "search", json!({"query": "quantum"})))
            .await
            .unwrap();

        assert_eq!(response.result.unwrap()["structuredContent"], json!({"results": []}));
    }

    #[tokio::test]
    async fn test_tools_call_fetch() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(tool_call(5, "fetch", json!({"id": "doc1"})))
            .await
            .unwrap();

        let document = &response.result.unwrap()["structuredContent"];
        assert_eq!(document["id"], "doc1");
        assert!(document["content"]
            .as_str()
            .unwrap()
            .contains("neural networks"));
        assert_eq!(document["metadata"]["category"], "ai");
    }

    #[tokio::test]
    async fn test_tools_call_fetch_not_found() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(tool_call(6, "fetch", json!({"id": "doc999"})))
            .await
            .unwrap();

        assert!(response.error.is_none());
        assert_eq!(response.id, Some(json!(6)));
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("doc999"));
        assert_eq!(
            result["structuredContent"]["error"]["code"],
            DOCUMENT_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_tools_call_empty_id_is_invalid_params() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(tool_call(10, "fetch", json!({"id": ""})))
            .await
            .unwrap();

        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tools_call_missing_params() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(7)),
            method: "tools/call".to_string(),
            params: None,
        };

        let response = handlers.handle_tools_call(request).await.unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("Missing params"));
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(tool_call(8, "index_repository", json!({})))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_hybrid_search_not_registered_locally() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(tool_call(9, "hybrid_search", json!({"query": "x"})))
            .await
            .unwrap();

        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn test_ping_handler() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_message(r#"{"jsonrpc": "2.0", "id": 10, "method": "ping"}"#)
            .await;

        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_message(r#"{"jsonrpc": "2.0", "method": "notifications/cancelled"}"#)
            .await;

        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_message(r#"{"jsonrpc": "2.0", "id": 11, "method": "resources/list"}"#)
            .await;

        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
        assert_eq!(response.id, Some(json!(11)));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let handlers = create_test_handlers();

        let response = handlers.handle_message("{\"jsonrpc\": ").await;

        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }
}
