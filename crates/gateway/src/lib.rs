//! HTTP gateway for AgentHub.
//!
//! Endpoints:
//!
//! - `GET  /`            — Health check with agent inventory
//! - `GET  /agents`      — List registered agents
//! - `POST /chat`        — Send a message, get a single response
//! - `POST /chat/stream` — Send a message, get an SSE frame stream
//!
//! Built on Axum. All state is injected through [`GatewayState`]; there
//! are no process-wide singletons.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::sse::{Event as SseEvent, Sse},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use agenthub_agent::{StreamSession, bridge, driver};
use agenthub_config::AppConfig;
use agenthub_core::{AgentRegistry, EventSink, ExecutionError, StreamFrame};
use agenthub_history::HistoryLoader;

/// Conversation id substituted when the request omits one.
const DEFAULT_CONVERSATION_ID: &str = "default";

// ── State ─────────────────────────────────────────────────────────────────

/// Shared application state for the gateway.
pub struct GatewayState {
    pub registry: AgentRegistry,
    pub history: HistoryLoader,
    pub default_agent: String,
}

pub type SharedState = Arc<GatewayState>;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/agents", get(list_agents_handler))
        .route("/chat", post(chat_handler))
        .route("/chat/stream", post(chat_stream_handler))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn serve(config: &AppConfig, state: SharedState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ChatRequest {
    /// The user's message.
    message: String,
    /// Conversation to attribute the message to (omit for "default").
    #[serde(default)]
    conversation_id: Option<String>,
    /// Which agent to route to (omit for the configured default).
    #[serde(default)]
    agent: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    conversation_id: String,
    agent: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    agents: Vec<String>,
    default_agent: String,
}

#[derive(Serialize)]
struct AgentListResponse {
    agents: HashMap<String, AgentDto>,
    default: String,
}

#[derive(Serialize)]
struct AgentDto {
    name: String,
    description: String,
    model: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn root_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "agenthub",
        agents: state.registry.list(),
        default_agent: state.default_agent.clone(),
    })
}

async fn list_agents_handler(State(state): State<SharedState>) -> Json<AgentListResponse> {
    let agents = state
        .registry
        .iter()
        .map(|(name, agent)| {
            (
                name.to_string(),
                AgentDto {
                    name: name.to_string(),
                    description: agent.description().to_string(),
                    model: agent.model().to_string(),
                },
            )
        })
        .collect();

    Json(AgentListResponse {
        agents,
        default: state.default_agent.clone(),
    })
}

fn unknown_agent_message(name: &str, registry: &AgentRegistry) -> String {
    format!(
        "{}. Available agents: {}",
        ExecutionError::AgentNotFound(name.to_string()),
        registry.list().join(", ")
    )
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let conversation_id = payload
        .conversation_id
        .unwrap_or_else(|| DEFAULT_CONVERSATION_ID.to_string());
    let agent_name = payload
        .agent
        .unwrap_or_else(|| state.default_agent.clone());

    info!(conversation_id = %conversation_id, agent = %agent_name, "chat request");

    let Some(agent) = state.registry.get(&agent_name) else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: unknown_agent_message(&agent_name, &state.registry),
            }),
        ));
    };

    // Single-shot call: events are not surfaced, so the sink's receiver
    // is dropped immediately.
    let (sink, _events) = EventSink::channel();
    let response = agent
        .invoke(&payload.message, &[], &sink)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

    Ok(Json(ChatResponse {
        response,
        conversation_id,
        agent: agent_name,
    }))
}

/// `POST /chat/stream` — Send a message, receive the session's frames
/// over SSE, one `data:` line per frame.
async fn chat_stream_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> impl IntoResponse {
    let conversation_id = payload
        .conversation_id
        .unwrap_or_else(|| DEFAULT_CONVERSATION_ID.to_string());
    let agent_name = payload
        .agent
        .unwrap_or_else(|| state.default_agent.clone());

    info!(conversation_id = %conversation_id, agent = %agent_name, "chat stream request");

    let stream: BoxStream<'static, Result<SseEvent, Infallible>> =
        match state.registry.get(&agent_name) {
            None => {
                warn!(agent = %agent_name, "Stream requested for unknown agent");
                let frame = StreamFrame::Error {
                    message: unknown_agent_message(&agent_name, &state.registry),
                };
                let wire = frame.to_wire(&conversation_id, &agent_name);
                stream::once(async move { Ok(SseEvent::default().data(wire.to_string())) })
                    .boxed()
            }
            Some(agent) => {
                let history = state.history.load(&conversation_id).await;
                let session = StreamSession::new(&conversation_id, &agent_name);
                let handle = driver::start(agent, payload.message, history);
                let rx = bridge::run(session, handle);

                ReceiverStream::new(rx)
                    .map(move |frame| {
                        let wire = frame.to_wire(&conversation_id, &agent_name);
                        Ok(SseEvent::default().data(wire.to_string()))
                    })
                    .boxed()
            }
        };

    // Proxies must not buffer the stream.
    (
        [("cache-control", "no-cache"), ("x-accel-buffering", "no")],
        Sse::new(stream),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenthub_agent::ScriptedAgent;
    use agenthub_core::{
        Agent, ConversationTurn, ExecutionError, ExecutionEvent, HistoryError, PartKind,
    };
    use agenthub_history::{HistoryRecord, HistoryStore};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Streams a two-chunk text part, then returns the joined output.
    struct StreamingAgent;

    #[async_trait]
    impl Agent for StreamingAgent {
        fn description(&self) -> &str {
            "streams Hello"
        }

        fn model(&self) -> &str {
            "none"
        }

        async fn invoke(
            &self,
            _message: &str,
            _history: &[ConversationTurn],
            events: &EventSink,
        ) -> Result<String, ExecutionError> {
            events.emit(ExecutionEvent::PartStart {
                kind: PartKind::Text,
                content: "Hel".into(),
                index: 0,
            });
            events.emit(ExecutionEvent::PartDelta {
                kind: PartKind::Text,
                content_delta: "lo".into(),
                index: 0,
            });
            Ok("Hello".into())
        }
    }

    struct FailingAgent;

    #[async_trait]
    impl Agent for FailingAgent {
        fn description(&self) -> &str {
            "always fails"
        }

        fn model(&self) -> &str {
            "none"
        }

        async fn invoke(
            &self,
            _message: &str,
            _history: &[ConversationTurn],
            _events: &EventSink,
        ) -> Result<String, ExecutionError> {
            Err(ExecutionError::Invocation("backend unavailable".into()))
        }
    }

    /// A history store whose backend is down.
    struct UnreachableStore;

    #[async_trait]
    impl HistoryStore for UnreachableStore {
        async fn fetch(&self, _id: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
            Err(HistoryError::Request("connection refused".into()))
        }
    }

    fn test_state() -> SharedState {
        let mut registry = AgentRegistry::new();
        registry.register(
            "demo",
            Arc::new(ScriptedAgent::new("Demo agent", "scripted", "Hi there!")),
        );
        registry.register("streamer", Arc::new(StreamingAgent));
        registry.register("broken", Arc::new(FailingAgent));

        Arc::new(GatewayState {
            registry,
            history: HistoryLoader::disabled(),
            default_agent: "demo".into(),
        })
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Parse an SSE body into the JSON payload of each `data:` line.
    async fn sse_frames(response: axum::response::Response) -> Vec<serde_json::Value> {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        text.lines()
            .filter_map(|line| line.strip_prefix("data: "))
            .map(|data| serde_json::from_str(data).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn health_endpoint_lists_agents() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "agenthub");
        assert_eq!(json["default_agent"], "demo");
        assert!(json["agents"].as_array().unwrap().len() >= 3);
    }

    #[tokio::test]
    async fn agents_endpoint_includes_metadata() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/agents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["default"], "demo");
        assert_eq!(json["agents"]["demo"]["description"], "Demo agent");
        assert_eq!(json["agents"]["demo"]["model"], "scripted");
    }

    #[tokio::test]
    async fn chat_uses_default_agent_and_conversation() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/chat", serde_json::json!({"message": "hi"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["response"], "Hi there!");
        assert_eq!(json["conversation_id"], "default");
        assert_eq!(json["agent"], "demo");
    }

    #[tokio::test]
    async fn chat_unknown_agent_is_404_with_inventory() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/chat",
                serde_json::json!({"message": "hi", "agent": "nope"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        let error = json["error"].as_str().unwrap();
        assert!(error.contains("Agent 'nope' not found"));
        assert!(error.contains("demo"));
    }

    #[tokio::test]
    async fn chat_invocation_failure_is_500() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/chat",
                serde_json::json!({"message": "hi", "agent": "broken"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("backend unavailable"));
    }

    #[tokio::test]
    async fn stream_delivers_full_frame_sequence() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/chat/stream",
                serde_json::json!({
                    "message": "hi",
                    "conversation_id": "conv-42",
                    "agent": "streamer"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let frames = sse_frames(response).await;
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0]["type"], "ping");
        assert_eq!(frames[0]["conversation_id"], "conv-42");
        assert_eq!(frames[0]["agent"], "streamer");
        assert_eq!(frames[1]["event_kind"], "part_start");
        assert_eq!(frames[1]["part"]["content"], "Hel");
        assert_eq!(frames[2]["event_kind"], "part_delta");
        assert_eq!(frames[2]["delta"]["content_delta"], "lo");
        assert_eq!(frames[3]["event_kind"], "final_result");
        assert_eq!(frames[4]["type"], "done");
        assert_eq!(frames[4]["done"], true);
        assert_eq!(frames[4]["response"], "Hello");
    }

    #[tokio::test]
    async fn stream_unknown_agent_is_single_error_frame() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/chat/stream",
                serde_json::json!({"message": "hi", "agent": "nope"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let frames = sse_frames(response).await;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["type"], "error");
        assert!(
            frames[0]["error"]
                .as_str()
                .unwrap()
                .contains("Agent 'nope' not found")
        );
    }

    #[tokio::test]
    async fn stream_failure_ends_with_error_frame() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/chat/stream",
                serde_json::json!({"message": "hi", "agent": "broken"}),
            ))
            .await
            .unwrap();

        let frames = sse_frames(response).await;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["type"], "ping");
        assert_eq!(frames[1]["type"], "error");
    }

    #[tokio::test]
    async fn endpoints_succeed_when_history_store_is_unreachable() {
        let mut registry = AgentRegistry::new();
        registry.register("streamer", Arc::new(StreamingAgent));
        let state = Arc::new(GatewayState {
            registry,
            history: HistoryLoader::new(Box::new(UnreachableStore)),
            default_agent: "streamer".into(),
        });

        let response = build_router(state.clone())
            .oneshot(post_json(
                "/chat/stream",
                serde_json::json!({"message": "hi", "conversation_id": "conv-9"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let frames = sse_frames(response).await;
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0]["type"], "ping");
        assert_eq!(frames[1]["event_kind"], "part_start");
        assert_eq!(frames[2]["event_kind"], "part_delta");
        assert_eq!(frames[3]["event_kind"], "final_result");
        assert_eq!(frames[4]["type"], "done");
        assert_eq!(frames[4]["response"], "Hello");

        let response = build_router(state)
            .oneshot(post_json("/chat", serde_json::json!({"message": "hi"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["response"], "Hello");
    }

    #[tokio::test]
    async fn stream_defaults_conversation_id() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/chat/stream",
                serde_json::json!({"message": "hi", "agent": "streamer"}),
            ))
            .await
            .unwrap();

        let frames = sse_frames(response).await;
        assert_eq!(frames[0]["conversation_id"], "default");
    }

    #[tokio::test]
    async fn stream_sets_no_buffering_headers() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(
                "/chat/stream",
                serde_json::json!({"message": "hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("cache-control").unwrap(),
            "no-cache"
        );
        assert_eq!(
            response.headers().get("x-accel-buffering").unwrap(),
            "no"
        );
    }
}
