//! Mock admin backend for integration tests.
//!
//! Serves canned JSON per `(method, path)` on an ephemeral port and records
//! every request so tests can count hits per endpoint.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use zw_common::{AccessToken, Role, Session};
use zw_console::{AppState, Config};

/// One request the backend saw.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    /// Path and query, as sent.
    pub target: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Default)]
struct Inner {
    routes: HashMap<(Method, String), (StatusCode, Value)>,
    hits: Vec<Hit>,
}

/// Handle to a running mock backend.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    /// Answer `method target` with `status` and `body`. `target` may carry a query.
    pub fn respond(&self, method: Method, target: &str, status: StatusCode, body: Value) {
        self.inner
            .lock()
            .unwrap()
            .routes
            .insert((method, target.to_string()), (status, body));
    }

    pub fn ok(&self, method: Method, target: &str, body: Value) {
        self.respond(method, target, StatusCode::OK, body);
    }

    /// Number of requests for `method` on `target` (path plus query).
    pub fn hits(&self, method: &Method, target: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .hits
            .iter()
            .filter(|h| &h.method == method && h.target == target)
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.inner.lock().unwrap().hits.len()
    }

    pub fn last_hit(&self) -> Option<Hit> {
        self.inner.lock().unwrap().hits.last().cloned()
    }

    pub fn bodies(&self, method: &Method, target: &str) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .hits
            .iter()
            .filter(|h| &h.method == method && h.target == target)
            .map(|h| h.body.clone())
            .collect()
    }
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);

    let mut inner = backend.inner.lock().unwrap();
    inner.hits.push(Hit {
        method: method.clone(),
        target: target.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    match inner.routes.get(&(method, target)) {
        Some((status, Value::Null)) => (*status).into_response(),
        Some((status, value)) => (*status, Json(value.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response(),
    }
}

/// A mock backend bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub url: String,
    pub backend: MockBackend,
    _handle: JoinHandle<()>,
}

pub async fn spawn_backend() -> TestServer {
    let backend = MockBackend::default();
    let router = Router::new()
        .fallback(handle)
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}/api/v1");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock backend failed");
    });

    TestServer {
        addr,
        url,
        backend,
        _handle: handle,
    }
}

/// Console state pointed at `server`, with an in-memory session.
pub async fn app_state(server: &TestServer) -> AppState {
    app_state_with(server, Config::default_for_test()).await
}

pub async fn app_state_with(server: &TestServer, config: Config) -> AppState {
    AppState::from_config(config.with_api_url(&server.url))
        .await
        .expect("Failed to build app state")
}

/// A signed-in session with the given role.
pub fn session(role: Role, user_id: &str, role_id: Option<&str>) -> Session {
    Session {
        token: AccessToken::new("test-jwt"),
        user_id: user_id.to_string(),
        display_name: "Test User".to_string(),
        email: Some("admin@example.com".to_string()),
        role: Some(role),
        role_id: role_id.map(str::to_string),
    }
}

/// Make the token verification endpoint accept the token.
pub fn accept_token(backend: &MockBackend) {
    backend.ok(
        Method::GET,
        "/api/v1/auth/verify/expiredToken",
        json!({"success": true, "message": "Token valid"}),
    );
}
