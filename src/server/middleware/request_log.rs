use std::{net::SocketAddr, time::Instant};

use axum::{
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

static NOT_AVAILABLE: &str = "N/A";

/// Logs the start and end of every request under a generated request ID.
///
/// The ID is added to the request headers, so handlers can read it, and returned to the
/// client in the `x-request-id` response header. Responses with a 5xx status are logged at
/// error level.
pub async fn log_request(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let request_id_header = HeaderValue::from_str(&request_id).ok();

    if let Some(value) = &request_id_header {
        request
            .headers_mut()
            .insert(X_REQUEST_ID.clone(), value.clone());
    }

    let span = tracing::info_span!("request", request_id = %request_id);

    async move {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let started = Instant::now();

        let client = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_else(|| format!("{}:{}", NOT_AVAILABLE, NOT_AVAILABLE));
        let user_agent = header_or_na(request.headers(), header::USER_AGENT);
        let content_type = header_or_na(request.headers(), header::CONTENT_TYPE);
        let authorization = if request.headers().contains_key(header::AUTHORIZATION) {
            "Present"
        } else {
            NOT_AVAILABLE
        };

        tracing::info!(
            "REQUEST START | Method: {} | Path: {} | Client: {} | Timestamp: {} | \
            User-Agent: {} | Content-Type: {} | Authorization: {}",
            method,
            path,
            client,
            Utc::now().to_rfc3339(),
            user_agent,
            content_type,
            authorization
        );

        let mut response = next.run(request).await;

        if let Some(value) = request_id_header {
            response.headers_mut().insert(X_REQUEST_ID.clone(), value);
        }

        let status = response.status();
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        if status.is_server_error() {
            tracing::error!(
                "REQUEST END | Method: {} | Path: {} | Status: {} | Duration: {:.2}ms",
                method,
                path,
                status.as_u16(),
                duration_ms
            );
        } else {
            tracing::info!(
                "REQUEST END | Method: {} | Path: {} | Status: {} | Duration: {:.2}ms",
                method,
                path,
                status.as_u16(),
                duration_ms
            );
        }

        response
    }
    .instrument(span)
    .await
}

fn header_or_na(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
