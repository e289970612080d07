#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use callsheet_api::app::build_app;
use callsheet_api::background::plan_flush;
use callsheet_api::config::ServerConfig;
use callsheet_api::session::PlanSessions;
use callsheet_api::state::AppState;

/// Debounce long enough that no test sees a background flush it did not
/// ask for.
pub const SLOW_DEBOUNCE_MS: u64 = 60_000;

/// Build a test `ServerConfig` with the dev CORS origin.
pub fn test_config(plan_flush_debounce_ms: u64) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        plan_flush_debounce_ms,
        plan_flush_retry_ms: TEST_RETRY_MS,
    }
}

/// Retry delay used by the test flush task.
pub const TEST_RETRY_MS: u64 = 200;

/// A running application plus handles on its flush task.
pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<PlanSessions>,
    pub cancel: CancellationToken,
    pub flush_task: JoinHandle<()>,
}

/// Build the full application with a running flush task.
pub fn build_test_app(pool: PgPool) -> Router {
    spawn_test_app(pool, SLOW_DEBOUNCE_MS).router
}

/// Like [`build_test_app`] with a custom flush quiet period.
pub fn build_test_app_with_debounce(pool: PgPool, debounce_ms: u64) -> Router {
    spawn_test_app(pool, debounce_ms).router
}

/// Build the application and keep the handles needed to drive or stop
/// the flush task.
pub fn spawn_test_app(pool: PgPool, debounce_ms: u64) -> TestApp {
    let config = test_config(debounce_ms);
    let (sessions, flush_rx) = PlanSessions::new();
    let sessions = Arc::new(sessions);
    let cancel = CancellationToken::new();

    let flush_task = tokio::spawn(plan_flush::run(
        pool.clone(),
        Arc::clone(&sessions),
        flush_rx,
        Duration::from_millis(debounce_ms),
        Duration::from_millis(TEST_RETRY_MS),
        cancel.clone(),
    ));

    let router = build_app(AppState {
        pool,
        config: Arc::new(config),
        sessions: Arc::clone(&sessions),
    });
    TestApp {
        router,
        sessions,
        cancel,
        flush_task,
    }
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project and one shooting day through the API. Returns the day id.
pub async fn create_day(app: &Router) -> i64 {
    let project = body_json(
        post_json(
            app.clone(),
            "/api/v1/projects",
            serde_json::json!({ "name": "Harbour Lights" }),
        )
        .await,
    )
    .await;
    let project_id = project["data"]["id"].as_i64().unwrap();

    let day = body_json(
        post_json(
            app.clone(),
            &format!("/api/v1/projects/{project_id}/shooting-days"),
            serde_json::json!({ "day_number": 1, "call_time": "7:00" }),
        )
        .await,
    )
    .await;
    day["data"]["id"].as_i64().unwrap()
}
