use axum::http::{Method, StatusCode};
use cyberbase::server::{
    config::Config, database::DatabaseManager, model::app::AppState, router::build_app,
};

use super::*;

/// Expect the 404 envelope for an unknown route
#[tokio::test]
async fn unknown_route_is_404() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let response = send(app(&test), request(Method::GET, "/api/nowhere")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["errors"]["code"], "RESOURCE_NOT_FOUND");
    assert!(body.get("data").is_none());

    Ok(())
}

/// Expect the 405 envelope naming the method for a route without it
#[tokio::test]
async fn wrong_method_is_405() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let response = send(app(&test), request(Method::PATCH, "/")).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert_eq!(body["status"], 405);
    assert_eq!(body["errors"]["code"], "METHOD_NOT_ALLOWED");
    assert!(body["errors"]["message"]
        .as_str()
        .unwrap()
        .contains("PATCH"));

    Ok(())
}

/// Expect the 405 envelope on module routes as well
#[tokio::test]
async fn wrong_method_on_module_is_405() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let response = send(app(&test), request(Method::PATCH, "/api/home")).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}

/// Expect the 413 envelope for a body above MAX_BODY_SIZE
#[tokio::test]
async fn oversized_body_is_413() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let app = app_with(&test, |config| config.max_body_size = 16);
    let body = format!(r#"{{"name":"{}"}}"#, "x".repeat(64));

    let response = send(app, json_request(Method::POST, "/api/users", body)).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["code"], "PAYLOAD_TOO_LARGE");

    Ok(())
}

/// Expect the 422 envelope for malformed JSON and invalid path parameters
#[tokio::test]
async fn invalid_input_is_422() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let malformed = send(app(&test), json_request(Method::POST, "/api/users", "{")).await;
    let bad_path = send(app(&test), request(Method::GET, "/api/users/neo")).await;
    let bad_query = send(app(&test), request(Method::GET, "/api/users?limit=-1")).await;

    for response in [malformed, bad_path, bad_query] {
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["message"], "unprocessable entity");
        assert_eq!(body["errors"]["code"], "UNPROCESSABLE");
    }

    Ok(())
}

/// Expect the 500 envelope without details when the database is unavailable
#[tokio::test]
async fn missing_database_is_500() {
    let mut config = Config::default();
    config.installed_modules = vec!["users".to_string()];
    let app = build_app(AppState::new(config, DatabaseManager::new()));

    let response = send(app, request(Method::GET, "/api/users")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["status"], 500);
    assert_eq!(body["errors"]["code"], "INTERNAL_SERVER_ERROR");
}
