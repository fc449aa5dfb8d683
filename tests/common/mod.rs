//! Test fixtures: an in-process stand-in for the management backend, plus a
//! session store backed by a temp file.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

use vigia::api::ApiClient;
use vigia::session::{SessionFile, SessionStore};

pub const TEST_IDENTIFIER: &str = "admin@vp.local";
pub const TEST_SECRET: &str = "admin123";

/// Mock backend behavior knobs.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Token handed out by `/auth/login`.
    pub token: &'static str,
    /// Role reported by `/me`.
    pub role: &'static str,
    /// When false, `/me` answers 500 to simulate identity-resolution failure.
    pub me_ok: bool,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            token: "abc",
            role: "admin",
            me_ok: true,
        }
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["identifier"] == TEST_IDENTIFIER && body["secret"] == TEST_SECRET {
        (StatusCode::OK, Json(json!({ "access_token": backend.token })))
    } else if body["identifier"] == "broken@vp.local" {
        // Rejection with a non-textual detail field.
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": 42 })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "invalid credentials" })),
        )
    }
}

async fn me(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !backend.me_ok {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "identity service down" })),
        );
    }
    match bearer(&headers) {
        Some(token) if token == backend.token => {
            (StatusCode::OK, Json(json!({ "role": backend.role })))
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "invalid token" })),
        ),
    }
}

async fn units(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer(&headers) {
        Some(token) if token == backend.token => (
            StatusCode::OK,
            Json(json!([{ "id": 1, "name": "A-101" }, { "id": 2, "name": "A-102" }])),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "invalid token" })),
        ),
    }
}

/// Slow list endpoint, for racing a fetch against a session change.
async fn rounds(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    match bearer(&headers) {
        Some(token) if token == backend.token => (StatusCode::OK, Json(json!([{ "id": 7 }]))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "invalid token" })),
        ),
    }
}

async fn dashboard_finance(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    match bearer(&headers) {
        Some(token) if token == backend.token => (
            StatusCode::OK,
            Json(json!({ "paid": 10, "pending": 2, "late": 1 })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "invalid token" })),
        ),
    }
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "authorization": headers
            .get("authorization")
            .and_then(|value| value.to_str().ok()),
    }))
}

async fn public_config() -> Json<Value> {
    Json(json!({
        "brand_name": "Test Condo",
        "primary_color": "#123456",
        "secondary_color": "#654321",
        "logo_path": "/test-logo.svg",
    }))
}

/// Serve the mock backend on an ephemeral port and return its base URL.
pub async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/me", get(me))
        .route("/units", get(units))
        .route("/rounds", get(rounds))
        .route("/dashboard/finance", get(dashboard_finance))
        .route("/echo-auth", get(echo_auth))
        .route("/public-config", get(public_config))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A fresh store backed by a temp session file.
pub fn temp_store() -> (Arc<SessionStore>, SessionFile, TempDir) {
    let dir = TempDir::new().unwrap();
    let file = SessionFile::new(dir.path().join("session.toml"));
    let store = Arc::new(SessionStore::open(file.clone()).unwrap());
    (store, file, dir)
}

/// Backend + client + store wired together.
pub async fn test_client(backend: Backend) -> (ApiClient, Arc<SessionStore>, SessionFile, TempDir) {
    let base_url = spawn_backend(backend).await;
    let (store, file, dir) = temp_store();
    (ApiClient::new(base_url, store.clone()), store, file, dir)
}
