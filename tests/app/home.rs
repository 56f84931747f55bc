use axum::http::{Method, StatusCode};
use serde_json::json;

use super::*;

/// Expect the welcome envelope on the root route
#[tokio::test]
async fn root_returns_welcome() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let response = send(app(&test), request(Method::GET, "/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": 200, "message": "OK", "data": { "info": "Welcome to cyberspace" } })
    );

    Ok(())
}

/// Expect the home module to answer GET, POST, PUT and DELETE
#[tokio::test]
async fn home_answers_every_method() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let response = send(app(&test), request(method, "/api/home")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "OK");
        assert_eq!(
            body["data"]["Home"],
            "Welcome to cyberspace! Ready for liftoff"
        );
    }

    Ok(())
}

/// Expect the home module to be absent when it is not installed
#[tokio::test]
async fn home_requires_installation() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let app = app_with(&test, |config| config.installed_modules = Vec::new());

    let response = send(app, request(Method::GET, "/api/home")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
