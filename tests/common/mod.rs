//! Common test utilities
//!
//! An axum stub of the lag API, served from a local `tokio::net::TcpListener`
//! so requests go through the real transport.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const NOT_FOUND_BODY: &str = r#"{"error":true,"message":"not found"}"#;

#[derive(Clone)]
struct StubState {
    routes: Arc<HashMap<String, (u16, String)>>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Serve `routes` (path → (status, body)); unknown paths answer 404
    pub async fn start(routes: Vec<(&str, u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let state = StubState {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(path, status, body)| (path.to_string(), (status, body)))
                    .collect(),
            ),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = state.requests.clone();

        let app = Router::new().fallback(respond).with_state(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn respond(State(state): State<StubState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(path.clone());

    let (status, body) = state
        .routes
        .get(&path)
        .cloned()
        .unwrap_or((404, NOT_FOUND_BODY.to_string()));
    let status = StatusCode::from_u16(status).unwrap();

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub fn ok(path: &str, body: serde_json::Value) -> (&str, u16, String) {
    (path, 200, body.to_string())
}
