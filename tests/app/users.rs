use axum::http::{Method, StatusCode};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Expect the users module to support the full create, read, update & delete cycle
#[tokio::test]
async fn crud_cycle() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let created = send(
        app(&test),
        json_request(Method::POST, "/api/users", r#"{"name":"neo"}"#),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["name"], "neo");

    let fetched = send(app(&test), request(Method::GET, &format!("/api/users/{}", id))).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["data"]["name"], "neo");

    let updated = send(
        app(&test),
        json_request(
            Method::PUT,
            &format!("/api/users/{}", id),
            r#"{"name":"the one","rank":"captain"}"#,
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["data"]["name"], "the one");
    assert_eq!(updated["data"]["id"], id);

    let deleted = send(
        app(&test),
        request(Method::DELETE, &format!("/api/users/{}", id)),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await["data"]["deleted"], id);

    let missing = send(app(&test), request(Method::GET, &format!("/api/users/{}", id))).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(missing).await["errors"]["code"],
        "RESOURCE_NOT_FOUND"
    );

    Ok(())
}

/// Expect pagination with skip and limit
#[tokio::test]
async fn lists_with_pagination() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    test.user().insert_users(5).await?;

    let response = send(app(&test), request(Method::GET, "/api/users?skip=2&limit=2")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "user-2");
    assert_eq!(users[1]["name"], "user-3");

    Ok(())
}

/// Expect an empty page to omit data from the envelope
#[tokio::test]
async fn empty_list_omits_data() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let response = send(app(&test), request(Method::GET, "/api/users")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "OK");
    assert!(body.get("data").is_none());

    Ok(())
}

/// Expect 422 for a limit above 200
#[tokio::test]
async fn rejects_large_limit() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let response = send(app(&test), request(Method::GET, "/api/users?limit=201")).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["message"][0]["field"], "limit");

    Ok(())
}

/// Expect a limit of exactly 200 to be accepted
#[tokio::test]
async fn accepts_max_limit() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    test.user().insert_users(3).await?;

    let response = send(app(&test), request(Method::GET, "/api/users?limit=200")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);

    Ok(())
}

/// Expect 422 rather than a 500 for a skip beyond the signed 64-bit range
#[tokio::test]
async fn rejects_out_of_range_skip() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let response = send(
        app(&test),
        request(Method::GET, "/api/users?skip=9223372036854775808"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["code"], "UNPROCESSABLE");
    assert_eq!(body["errors"]["message"][0]["field"], "skip");

    Ok(())
}

/// Expect the largest signed 64-bit skip to return an empty page
#[tokio::test]
async fn accepts_max_skip() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    test.user().insert_users(1).await?;

    let response = send(
        app(&test),
        request(Method::GET, "/api/users?skip=9223372036854775807"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.get("data").is_none());

    Ok(())
}

/// Expect 422 and nothing stored for an empty name
#[tokio::test]
async fn rejects_empty_name() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let response = send(
        app(&test),
        json_request(Method::POST, "/api/users", r#"{"name":""}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(entity::prelude::User::find().count(&test.db).await?, 0);

    Ok(())
}

/// Expect the users module to be absent unless installed
#[tokio::test]
async fn requires_installation() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let app = app_with(&test, |config| {
        config.installed_modules = vec!["home".to_string()]
    });

    let response = send(app, request(Method::GET, "/api/users")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
