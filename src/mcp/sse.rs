//! Server-Sent Events transport for MCP
//!
//! A client opens `GET {sse_path}` and receives an `endpoint` event
//! naming the URL to POST its JSON-RPC messages to. Each POST is
//! acknowledged with 202 and the response travels back over the open
//! event stream as a `message` event.

use crate::core::services::Services;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::JsonRpcResponse;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

const KEEP_ALIVE_SECS: u64 = 15;
const SESSION_BUFFER: usize = 32;

/// Open SSE sessions and the handlers they share
pub struct SseState {
    handlers: Arc<ProtocolHandlers>,
    sessions: RwLock<HashMap<String, mpsc::Sender<JsonRpcResponse>>>,
    message_path: String,
}

impl SseState {
    pub fn new(handlers: Arc<ProtocolHandlers>, message_path: impl Into<String>) -> Self {
        Self {
            handlers,
            sessions: RwLock::new(HashMap::new()),
            message_path: message_path.into(),
        }
    }

    /// Number of connected clients
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Removes a session once its event stream is dropped
struct SessionGuard {
    id: String,
    state: Arc<SseState>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let id = std::mem::take(&mut self.id);
        let state = Arc::clone(&self.state);
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                state.sessions.write().await.remove(&id);
                info!("SSE session {} closed", id);
            });
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    session_id: Option<String>,
}

/// Build the SSE routes from the server configuration
pub fn router(services: Arc<Services>) -> Router {
    let sse_path = services.config.server.sse_path.clone();
    let message_path = services.config.server.message_path.clone();
    let handlers = Arc::new(ProtocolHandlers::new(services));
    let state = Arc::new(SseState::new(handlers, message_path.clone()));

    let mut router = Router::new()
        .route(&sse_path, get(sse_handler))
        .route(&message_path, post(message_handler));

    // Accept the message path with or without its trailing slash
    let alternate = match message_path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        Some(_) => None,
        None => Some(format!("{message_path}/")),
    };
    if let Some(alternate) = alternate {
        router = router.route(&alternate, post(message_handler));
    }

    router.with_state(state)
}

/// GET handler opening an event stream for a new session
pub async fn sse_handler(
    State(state): State<Arc<SseState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4().simple().to_string();
    let (tx, rx) = mpsc::channel(SESSION_BUFFER);

    state.sessions.write().await.insert(session_id.clone(), tx);
    info!(
        "SSE session {} opened ({} active)",
        session_id,
        state.session_count().await
    );

    let endpoint = format!("{}?session_id={}", state.message_path, session_id);
    let guard = SessionGuard {
        id: session_id,
        state: Arc::clone(&state),
    };

    let endpoint_event = stream::once(async move {
        Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint))
    });

    let messages = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let response = rx.recv().await?;
        let event = Event::default()
            .event("message")
            .json_data(&response)
            .unwrap_or_else(|e| {
                warn!("Failed to encode SSE message: {}", e);
                Event::default().comment("encoding error")
            });
        Some((Ok(event), (rx, guard)))
    });

    Sse::new(endpoint_event.chain(messages)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(KEEP_ALIVE_SECS))
            .text("keep-alive"),
    )
}

/// POST handler accepting one JSON-RPC message for an open session
pub async fn message_handler(
    State(state): State<Arc<SseState>>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    let Some(session_id) = query.session_id.filter(|id| !id.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "session_id is required").into_response();
    };

    let sender = match state.sessions.read().await.get(&session_id) {
        Some(sender) => sender.clone(),
        None => {
            debug!("Message for unknown session {}", session_id);
            return (StatusCode::NOT_FOUND, "Could not find session").into_response();
        }
    };

    let handlers = Arc::clone(&state.handlers);
    tokio::spawn(async move {
        let response = handlers.handle_message(&body).await;
        if response.is_empty() {
            return;
        }
        if sender.send(response).await.is_err() {
            warn!("SSE session {} closed before response was delivered", session_id);
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
