//! HTTP routing and OpenAPI documentation configuration.
//!
//! The application router is made of the root welcome route and the modules listed in
//! `INSTALLED_MODULES`, all documented with utoipa. The collected OpenAPI document is served
//! at `/api/openapi.json` with Swagger UI at `/api/docs` and ReDoc at `/api/redocs`. Unknown
//! paths and methods fall back to the 404 and 405 envelopes.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::api::{ApiResponse, ErrorDto},
    server::{
        apps::{home::controller::HOME_TAG, users::controller::USERS_TAG},
        config::ENDPOINT_API,
        controller::{fallback, root},
        middleware,
        model::app::AppState,
        url_manager::{register_modules, ModuleRegistry},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cyberbase",
        description = "Robust and modular backend base, designed for the fast development of \
            secure applications and services operating in cyberspace",
        version = "1.0.1"
    ),
    components(schemas(ApiResponse, ErrorDto)),
    tags(
        (name = root::ROOT_TAG, description = "Backend status"),
        (name = HOME_TAG, description = "Home module"),
        (name = USERS_TAG, description = "Users module"),
    )
)]
pub struct ApiDoc;

/// Builds the application with every module known to [`ModuleRegistry::default`].
///
/// # Example
/// ```ignore
/// let state = AppState::new(config, db);
/// let app = build_app(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn build_app(state: AppState) -> Router {
    build_app_with_registry(state, &ModuleRegistry::default())
}

/// Builds the application, mounting the installed modules found in `registry`.
///
/// Middleware is configured from the configuration held by `state`.
pub fn build_app_with_registry(state: AppState, registry: &ModuleRegistry) -> Router {
    let config = state.config.clone();

    let app = OpenApiRouter::with_openapi(ApiDoc::openapi()).routes(routes!(root::index));
    let app = register_modules(app, registry, &config.installed_modules);

    let (routes, api) = app.split_for_parts();

    let docs_url = format!("{}/docs", ENDPOINT_API);
    let redoc_url = format!("{}/redocs", ENDPOINT_API);
    let openapi_url = format!("{}/openapi.json", ENDPOINT_API);

    let mut redoc = Router::<AppState>::from(Redoc::with_url(redoc_url, api.clone()));
    if config.use_secweb {
        redoc = middleware::security::apply_docs(redoc);
    }

    let router = routes
        .merge(SwaggerUi::new(docs_url).url(openapi_url, api))
        .merge(redoc)
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::not_allowed)
        .with_state(state);

    middleware::apply(router, &config)
}
