#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::MockServer;

use leadrelay_api::config::ServerConfig;
use leadrelay_api::router::build_app_router;
use leadrelay_api::state::AppState;
use leadrelay_db::{SupabaseClient, SupabaseConfig};
use leadrelay_engine::{AnalysisEngineClient, EngineConfig};

pub const LEAD_ID: &str = "3f2b8c1e-9d4a-4f6b-8e2a-1c5d7e9f0a12";

/// Stubbed collaborators for one test.
pub struct Collaborators {
    pub db: MockServer,
    pub engine: MockServer,
}

impl Collaborators {
    pub async fn start() -> Self {
        Self {
            db: MockServer::start().await,
            engine: MockServer::start().await,
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router, pointing both clients at the given
/// mock servers.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(collaborators: &Collaborators) -> Router {
    build_app(collaborators.db.uri(), collaborators.engine.uri())
}

/// Build the application against arbitrary collaborator base URLs.
pub fn build_app(db_url: String, engine_url: String) -> Router {
    let config = test_config();
    let db = SupabaseClient::new(&SupabaseConfig {
        url: db_url,
        service_key: "test-service-key".into(),
    })
    .unwrap();
    let engine = AnalysisEngineClient::new(&EngineConfig {
        base_url: engine_url,
    });

    let state = AppState {
        config: Arc::new(config.clone()),
        db,
        engine,
    };

    build_app_router(state, &config)
}

/// Base URL of a port nothing listens on.
pub async fn closed_port_uri() -> String {
    // Bind an ephemeral port and release it so nothing is listening there.
    // (A dropped pooled `MockServer` keeps listening and would answer 404.)
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
