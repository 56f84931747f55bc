use axum::response::IntoResponse;
use serde_json::json;

use crate::{model::api::ApiResponse, server::rest::Rest};

pub static HOME_TAG: &str = "home";

static WELCOME: &str = "Welcome to cyberspace! Ready for liftoff";

fn welcome() -> impl IntoResponse {
    Rest::ok(json!({ "Home": WELCOME }))
}

/// Welcome message of the home module
#[utoipa::path(
    get,
    path = "/",
    tag = HOME_TAG,
    responses(
        (status = 200, description = "Welcome message", body = ApiResponse),
    ),
)]
pub async fn home_get() -> impl IntoResponse {
    welcome()
}

#[utoipa::path(
    post,
    path = "/",
    tag = HOME_TAG,
    responses(
        (status = 200, description = "Welcome message", body = ApiResponse),
    ),
)]
pub async fn home_post() -> impl IntoResponse {
    welcome()
}

#[utoipa::path(
    put,
    path = "/",
    tag = HOME_TAG,
    responses(
        (status = 200, description = "Welcome message", body = ApiResponse),
    ),
)]
pub async fn home_put() -> impl IntoResponse {
    welcome()
}

#[utoipa::path(
    delete,
    path = "/",
    tag = HOME_TAG,
    responses(
        (status = 200, description = "Welcome message", body = ApiResponse),
    ),
)]
pub async fn home_delete() -> impl IntoResponse {
    welcome()
}
