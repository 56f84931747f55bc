//! Integration tests driving the complete application router.
//!
//! Requests go through the same middleware, fallbacks and module registration as in
//! production, backed by an in-memory SQLite database from `cyberbase_test_utils`.

mod docs;
mod errors;
mod home;
mod middleware;
mod users;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use cyberbase::server::{
    config::Config, database::DatabaseManager, model::app::AppState, router::build_app,
};
use cyberbase_test_utils::prelude::*;
use serde_json::Value;
use tower::ServiceExt;

/// Builds the application over the test database with every module installed.
///
/// `configure` can adjust the configuration before the application is built.
pub fn app_with(test: &TestSetup, configure: impl FnOnce(&mut Config)) -> Router {
    let mut config = Config::default();
    config.installed_modules = vec!["home".to_string(), "users".to_string()];
    configure(&mut config);

    build_app(AppState::new(
        config,
        DatabaseManager::from_connection(test.db.clone()),
    ))
}

pub fn app(test: &TestSetup) -> Router {
    app_with(test, |_| {})
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
