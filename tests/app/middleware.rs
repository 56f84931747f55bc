use axum::http::{header, Method, Request, StatusCode};

use super::*;

/// Expect a wildcard CORS configuration to mirror the origin with credentials
#[tokio::test]
async fn cors_preflight_mirrors_origin() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/home")
        .header(header::ORIGIN, "https://zion.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = send(app(&test), request).await;

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://zion.example"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );

    Ok(())
}

/// Expect security headers only when USE_SECWEB is enabled
#[tokio::test]
async fn security_headers_follow_configuration() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let secured = app_with(&test, |config| config.use_secweb = true);

    let with = send(secured, request(Method::GET, "/api/nowhere")).await;
    let without = send(app(&test), request(Method::GET, "/")).await;

    assert_eq!(with.status(), StatusCode::NOT_FOUND);
    let csp = with
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("frame-ancestors 'none'"));
    assert_eq!(with.headers().get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert!(!without
        .headers()
        .contains_key(header::CONTENT_SECURITY_POLICY));

    Ok(())
}

/// Expect an x-request-id header only when LOG_REQUESTS is enabled
#[tokio::test]
async fn request_id_follows_configuration() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let logged = app_with(&test, |config| config.log_requests = true);

    let with = send(logged, request(Method::GET, "/")).await;
    let without = send(app(&test), request(Method::GET, "/")).await;

    assert!(with.headers().contains_key("x-request-id"));
    assert!(!without.headers().contains_key("x-request-id"));

    Ok(())
}

/// Expect large responses to be gzipped for clients accepting it
#[tokio::test]
async fn compresses_large_responses() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let request = Request::builder()
        .uri("/api/openapi.json")
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();

    let response = send(app(&test), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_ENCODING).unwrap(),
        "gzip"
    );

    Ok(())
}
