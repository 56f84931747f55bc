use axum::response::IntoResponse;
use serde_json::json;

use crate::{model::api::ApiResponse, server::rest::Rest};

pub static ROOT_TAG: &str = "root";

/// Welcome message of the API
#[utoipa::path(
    get,
    path = "/",
    tag = ROOT_TAG,
    responses(
        (status = 200, description = "The backend is up", body = ApiResponse),
    ),
)]
pub async fn index() -> impl IntoResponse {
    Rest::ok(json!({ "info": "Welcome to cyberspace" }))
}
