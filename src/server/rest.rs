//! Builders for the JSON envelope every endpoint responds with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::model::api::ApiResponse;

pub struct Rest;

impl Rest {
    /// Builds a response whose HTTP status matches the `status` field of the envelope.
    ///
    /// `data` and `errors` are left out of the body when they are missing or empty.
    pub fn response(
        status: StatusCode,
        message: impl Into<String>,
        data: Option<Value>,
        errors: Option<Value>,
    ) -> Response {
        let body = ApiResponse::new(status.as_u16(), message, data, errors);

        (status, Json(body)).into_response()
    }

    /// 200 response with `message: "OK"`.
    pub fn ok(data: Value) -> Response {
        Self::response(StatusCode::OK, "OK", Some(data), None)
    }

    /// Error response carrying `{"code": ..., "message": ...}` in `errors`.
    pub fn error(
        status: StatusCode,
        message: impl Into<String>,
        code: &str,
        detail: impl Into<Value>,
    ) -> Response {
        let errors = json!({ "code": code, "message": detail.into() });

        Self::response(status, message, None, Some(errors))
    }
}
