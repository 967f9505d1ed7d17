use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// A request as seen by the fake agents API
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Value,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
struct FakeApi {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeApi {
    fn record(&self, method: &str, path: String, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            method: method.to_string(),
            path,
            body,
            authorization,
        });
    }
}

fn with_id(id: &str, mut body: Value) -> Value {
    body["id"] = json!(id);
    body
}

async fn create_agent(State(api): State<FakeApi>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    api.record("POST", "/api/agents".to_string(), &headers, body.clone());
    if body["name"] == "reject" {
        return (StatusCode::UNPROCESSABLE_ENTITY, "invalid agent").into_response();
    }
    Json(with_id("agent_1", body)).into_response()
}

async fn update_agent(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.record("PATCH", format!("/api/agents/{}", id), &headers, body.clone());
    if id == "missing" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(with_id(&id, body)).into_response()
}

async fn get_agent(State(api): State<FakeApi>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    api.record("GET", format!("/api/agents/{}", id), &headers, Value::Null);
    if id != "a1" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": "a1",
        "name": "Researcher",
        "provider": "anthropic",
        "model": "claude-3-opus-20240229",
        "tools": ["file_search", "calculator"],
        "recursion_limit": 4,
        "conversation_starters": ["What's new?"],
        "isCollaborative": false
    }))
    .into_response()
}

async fn endpoints(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    api.record("GET", "/api/endpoints".to_string(), &headers, Value::Null);
    // raw body so key order survives
    (
        [("content-type", "application/json")],
        r#"{"openAI":{"order":0},"assistants":{"order":1},"agents":{"order":2},"anthropic":null}"#,
    )
        .into_response()
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    pub async fn new() -> Self {
        let api = FakeApi::default();
        let requests = api.requests.clone();

        let app = Router::new()
            .route("/api/agents", post(create_agent))
            .route("/api/agents/:id", get(get_agent).patch(update_agent))
            .route("/api/endpoints", get(endpoints))
            .with_state(api);

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            addr,
            base_url,
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}
