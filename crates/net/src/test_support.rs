//! Shared fixtures for handler tests: a backend on a temporary database, request builders,
//! and in-process stand-ins for upstream services.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::Router;
use mentorship_database::basic_db::{InnerDatabase, SafeDatabase};
use mentorship_service::remote::{http_client, DEFAULT_TIMEOUT};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::config::BackendConfig;
use crate::server::backend_app;
use crate::state::BackendState;

pub const PASSWORD: &str = "correct-horse";

pub struct TestBackend {
    pub app: Router,
    pub state: BackendState<InnerDatabase>,
    _dir: TempDir,
}

pub fn backend_config(ai_service_url: &str, openvidu_url: &str) -> BackendConfig {
    BackendConfig {
        port: 0,
        database_path: Default::default(),
        secret_key: "test-secret".to_string(),
        token_ttl: Duration::from_secs(3600),
        ai_service_url: ai_service_url.to_string(),
        openvidu_url: openvidu_url.to_string(),
        openvidu_secret: "MY_SECRET".to_string(),
        http_timeout: DEFAULT_TIMEOUT,
    }
}

pub fn test_backend_with(ai_service_url: &str, openvidu_url: &str) -> TestBackend {
    test_backend_from(&backend_config(ai_service_url, openvidu_url))
}

pub fn test_backend_from(config: &BackendConfig) -> TestBackend {
    let dir = tempdir().unwrap();
    let database = InnerDatabase::new(dir.path()).unwrap();
    let state = BackendState::new(database, config, http_client(config.http_timeout).unwrap());

    TestBackend {
        app: backend_app(state.clone()),
        state,
        _dir: dir,
    }
}

/// Backend whose upstream services are all unreachable.
pub fn test_backend() -> TestBackend {
    let nowhere = unused_url();
    test_backend_with(&format!("{nowhere}/match"), &nowhere)
}

/// URL of a local port with nothing listening on it.
pub fn unused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}")
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Status and body. Bodies that are not JSON come back as a JSON string.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub async fn signup(app: &Router, email: &str, user_type: &str) -> Value {
    let payload = json!({
        "email": email,
        "name": "Test User",
        "user_type": user_type,
        "password": PASSWORD,
    });

    let (status, body) = send(app, json_request("POST", "/users/", None, payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

pub async fn post_login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/login/")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={email}&password={password}")))
        .unwrap();

    send(app, request).await
}

/// Registers a user and returns `(user id, access token)`.
pub async fn signup_and_login(app: &Router, email: &str, user_type: &str) -> (String, String) {
    let user = signup(app, email, user_type).await;
    let (status, body) = post_login(app, email, PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    (
        user["id"].as_str().unwrap().to_string(),
        body["access_token"].as_str().unwrap().to_string(),
    )
}
