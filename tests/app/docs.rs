use axum::http::{header, Method, StatusCode};

use super::*;

/// Expect the OpenAPI document to describe the installed modules
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let response = send(app(&test), request(Method::GET, "/api/openapi.json")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["info"]["title"], "Cyberbase");
    assert_eq!(body["info"]["version"], "1.0.1");
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/"));
    assert!(paths.keys().any(|path| path.starts_with("/api/home")));
    assert!(paths.keys().any(|path| path.starts_with("/api/users")));

    Ok(())
}

/// Expect modules that are not installed to be left out of the document
#[tokio::test]
async fn openapi_follows_installed_modules() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let app = app_with(&test, |config| {
        config.installed_modules = vec!["home".to_string()]
    });

    let response = send(app, request(Method::GET, "/api/openapi.json")).await;

    let body = body_json(response).await;
    let paths = body["paths"].as_object().unwrap();
    assert!(!paths.keys().any(|path| path.starts_with("/api/users")));

    Ok(())
}

/// Expect the Swagger UI and ReDoc pages to be served
#[tokio::test]
async fn serves_documentation_pages() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let swagger = send(app(&test), request(Method::GET, "/api/docs/")).await;
    let redoc = send(app(&test), request(Method::GET, "/api/redocs")).await;

    assert_eq!(swagger.status(), StatusCode::OK);
    assert_eq!(redoc.status(), StatusCode::OK);

    Ok(())
}

/// Expect the ReDoc inline boot script to be allowed when security headers are enabled
#[tokio::test]
async fn redoc_inline_script_allowed_with_secweb() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let secured = || app_with(&test, |config| config.use_secweb = true);

    let redoc = send(secured(), request(Method::GET, "/api/redocs")).await;
    let root = send(secured(), request(Method::GET, "/")).await;

    let script_src = |response: &Response| {
        response
            .headers()
            .get(header::CONTENT_SECURITY_POLICY)
            .unwrap()
            .to_str()
            .unwrap()
            .split("; ")
            .find(|directive| directive.starts_with("script-src "))
            .unwrap()
            .to_string()
    };
    let redoc_script_src = script_src(&redoc);
    let root_script_src = script_src(&root);

    assert!(redoc_script_src.contains("'unsafe-inline'"));
    assert!(!root_script_src.contains("'unsafe-inline'"));
    assert_eq!(
        redoc.headers().get(header::X_FRAME_OPTIONS).unwrap(),
        "DENY"
    );
    let bytes = to_bytes(redoc.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("Redoc.init"));

    Ok(())
}
