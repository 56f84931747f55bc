use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::server::rest::Rest;

static NOT_FOUND_MESSAGE: &str = "OMG! Resource lost in cyberspace!";
static PAYLOAD_TOO_LARGE_MESSAGE: &str = "OMG! Heavy payload detected in cyberspace!";
static METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed in this zone of cyberspace.";
static UNPROCESSABLE_MESSAGE: &str = "unprocessable entity";

/// Errors caused by the request rather than by the server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No route matches the request path
    #[error("No route found for {method} {path}")]
    RouteNotFound { method: Method, path: String },
    /// A route matched but the resource it addresses does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Method {method} is not allowed for {path}")]
    MethodNotAllowed { method: Method, path: String },
    #[error("Request payload too large: {0}")]
    PayloadTooLarge(String),
    /// Request body, query or path failed to parse or validate
    #[error("Request validation failed: {0}")]
    Validation(Value),
    /// Arbitrary status raised by a handler, with optional error details
    #[error("HTTP error {status}")]
    Http {
        status: StatusCode,
        detail: Option<Value>,
    },
}

impl ApiError {
    /// Validation failure for a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(json!([{ "field": field, "message": message.into() }]))
    }

    pub fn unauthorized() -> Self {
        Self::Http {
            status: StatusCode::UNAUTHORIZED,
            detail: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::RouteNotFound { method, path } => {
                tracing::warn!(
                    "Resource lost in cyberspace! Nothing found at {} {}",
                    method,
                    path
                );

                Rest::error(
                    StatusCode::NOT_FOUND,
                    NOT_FOUND_MESSAGE,
                    "RESOURCE_NOT_FOUND",
                    "The requested resource does not exist",
                )
            }
            Self::NotFound(detail) => {
                tracing::debug!("Resource not found: {}", detail);

                Rest::error(
                    StatusCode::NOT_FOUND,
                    NOT_FOUND_MESSAGE,
                    "RESOURCE_NOT_FOUND",
                    detail,
                )
            }
            Self::MethodNotAllowed { method, path } => {
                tracing::warn!(
                    "Method blocked in cyberspace! {} is not allowed on {}",
                    method,
                    path
                );

                Rest::error(
                    StatusCode::METHOD_NOT_ALLOWED,
                    METHOD_NOT_ALLOWED_MESSAGE,
                    "METHOD_NOT_ALLOWED",
                    format!(
                        "The method {} is not allowed for the requested route. \
                        Please check the allowed HTTP methods.",
                        method
                    ),
                )
            }
            Self::PayloadTooLarge(detail) => {
                tracing::warn!("Heavy payload detected in cyberspace! {}", detail);

                Rest::error(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    PAYLOAD_TOO_LARGE_MESSAGE,
                    "PAYLOAD_TOO_LARGE",
                    "The request is too large.",
                )
            }
            Self::Validation(detail) => {
                tracing::warn!("Request rejected at the gates of cyberspace: {}", detail);

                Rest::error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    UNPROCESSABLE_MESSAGE,
                    "UNPROCESSABLE",
                    detail,
                )
            }
            Self::Http { status, detail } => {
                tracing::warn!(status = status.as_u16(), "HTTP error raised by handler");

                let reason = status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_lowercase();
                let detail = detail
                    .unwrap_or_else(|| json!({ "status": status.as_u16(), "message": reason }));

                Rest::response(status, reason, None, Some(detail))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge(rejection.body_text());
        }

        Self::Validation(Value::String(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(Value::String(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(Value::String(rejection.body_text()))
    }
}
