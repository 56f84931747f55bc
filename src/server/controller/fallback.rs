use axum::http::{Method, Uri};

use crate::server::error::api::ApiError;

/// Router fallback for paths no route matches.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}

/// Fallback for paths that exist but do not accept the request method.
pub async fn not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
    }
}
